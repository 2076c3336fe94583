use serde::Serialize;

use super::AdminConsole;
use crate::admin::export::{CsvDownload, ExportKind};
use crate::admin::panel::PanelState;
use crate::admin::pipeline::normalize_filter;
use crate::api_client::admin::AuditQuery;
use crate::errors::AppError;
use crate::models::audit::{AuditLogEntry, AUDIT_ACTIONS};

#[derive(Debug, Clone, Serialize)]
pub struct AuditPanel {
    #[serde(flatten)]
    pub panel: PanelState<AuditLogEntry>,
    pub filters: AuditQuery,
    /// Choices for the action filter besides "all".
    pub actions: &'static [&'static str],
}

impl Default for AuditPanel {
    fn default() -> Self {
        Self {
            panel: PanelState::default(),
            filters: AuditQuery::default(),
            actions: AUDIT_ACTIONS,
        }
    }
}

impl AdminConsole {
    pub async fn load_applications(&self) {
        let ticket = self.lock().await.applications.begin();
        let result = self
            .api
            .admin_applications(&self.token)
            .await
            .map_err(|e| e.message("Failed to load applications"));
        self.settle(|s| {
            s.applications.finish_rows(ticket, result);
        })
        .await;
    }

    /// Fetches the full application; the snapshot then carries its resume
    /// link.
    pub async fn open_application(&self, application_id: &str) {
        let ticket = self.lock().await.applications.begin();
        let result = self
            .api
            .admin_application(&self.token, application_id)
            .await
            .map_err(|e| e.message("Failed to load application"));
        self.settle(|s| match result {
            Ok(application) => {
                if s.applications.finish(ticket, Ok(())) {
                    s.applications.select(Some(application));
                }
            }
            Err(message) => {
                s.applications.finish(ticket, Err(message));
            }
        })
        .await;
    }

    pub async fn close_application(&self) {
        self.lock().await.applications.select(None);
    }

    pub async fn export_applications_csv(&self) -> Result<CsvDownload, AppError> {
        let bytes = self
            .api
            .export_applications_csv(&self.token)
            .await
            .map_err(|e| AppError::upstream(e, "Failed to export applications"))?;
        Ok(CsvDownload::new(ExportKind::Applications, bytes))
    }

    pub async fn load_audit(&self) {
        let (ticket, query) = {
            let mut state = self.lock().await;
            (state.audit.panel.begin(), state.audit.filters.clone())
        };
        let result = self
            .api
            .audit_logs(&self.token, &query)
            .await
            .map_err(|e| e.message("Failed to load audit logs"));
        self.settle(|s| {
            s.audit.panel.finish_rows(ticket, result);
        })
        .await;
    }

    /// `all` or blank means no filter.
    pub async fn set_audit_filters(&self, filters: AuditQuery) {
        self.lock().await.audit.filters = AuditQuery {
            action: normalize_filter(filters.action),
            job_slug: normalize_filter(filters.job_slug),
        };
        self.load_audit().await;
    }
}
