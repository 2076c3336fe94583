use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditLogEntry {
    pub at: String,
    pub action: String,
    pub actor: String,
    pub actor_role: Option<String>,
    pub candidate_id: Option<String>,
    pub job_slug: Option<String>,
}

/// Actions the audit filter offers besides "all".
pub const AUDIT_ACTIONS: &[&str] = &[
    "candidate.promote",
    "candidate.reject",
    "candidate.finalize",
    "candidate.score",
    "candidate.bulk_promote",
    "candidate.bulk_reject",
    "candidate.bulk_finalize",
    "candidate.bulk_delete",
    "admin.create_sub_admin",
    "admin.disable_sub_admin",
    "admin.delete_sub_admin",
];
