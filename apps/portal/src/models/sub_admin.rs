use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubAdmin {
    pub username: String,
    pub role: Option<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    pub created_at: Option<String>,
}

fn active_by_default() -> bool {
    true
}

/// Credentials for `POST /admin/login` and `POST /admin/sub-admins`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}
