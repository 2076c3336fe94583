//! Admin role, read from the login token's payload.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    SubAdmin,
    Admin,
}

impl AdminRole {
    /// Reads the `role` claim. Missing or undecodable payloads count as
    /// `sub_admin`.
    pub fn from_token(token: &str) -> Self {
        let role = token
            .split('.')
            .nth(1)
            .and_then(|segment| URL_SAFE_NO_PAD.decode(segment.trim_end_matches('=')).ok())
            .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).ok())
            .and_then(|claims| claims.get("role").and_then(Value::as_str).map(str::to_owned));

        match role.as_deref() {
            Some("super_admin") => AdminRole::SuperAdmin,
            Some("sub_admin") | Some("") | None => AdminRole::SubAdmin,
            Some(_) => AdminRole::Admin,
        }
    }

    pub fn is_super(self) -> bool {
        self == AdminRole::SuperAdmin
    }

    pub fn label(self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "Super Admin",
            AdminRole::SubAdmin => "Sub-admin",
            AdminRole::Admin => "Admin",
        }
    }
}

#[cfg(test)]
pub(crate) fn token_with_claims(claims: &Value) -> String {
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("eyJhbGciOiJIUzI1NiJ9.{payload}.sig")
}
