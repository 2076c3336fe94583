use super::{AdminConsole, ConsoleAction};
use crate::admin::confirm::ConfirmationPrompt;
use crate::errors::AppError;
use crate::models::sub_admin::AdminCredentials;

impl AdminConsole {
    fn require_super(&self) -> Result<(), AppError> {
        if self.role.is_super() {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    pub async fn load_admins(&self) {
        let ticket = self.lock().await.admins.begin();
        let result = self
            .api
            .sub_admins(&self.token)
            .await
            .map_err(|e| e.message("Failed to load sub-admins"));
        self.settle(|s| {
            s.admins.finish_rows(ticket, result);
        })
        .await;
    }

    pub async fn reload_admins(&self) -> Result<(), AppError> {
        self.require_super()?;
        self.load_admins().await;
        Ok(())
    }

    pub async fn create_sub_admin(&self, credentials: AdminCredentials) -> Result<(), AppError> {
        self.require_super()?;
        let credentials = AdminCredentials {
            username: credentials.username.trim().to_string(),
            password: credentials.password,
        };
        if credentials.username.is_empty() || credentials.password.is_empty() {
            self.lock()
                .await
                .admins
                .fail("Username and password are required");
            return Ok(());
        }
        match self.api.create_sub_admin(&self.token, &credentials).await {
            Ok(()) => self.load_admins().await,
            Err(e) => {
                let message = e.message("Failed to create sub-admin");
                self.settle(|s| s.admins.fail(message)).await;
            }
        }
        Ok(())
    }

    pub async fn request_disable_sub_admin(&self, username: &str) -> Result<ConfirmationPrompt, AppError> {
        self.require_super()?;
        Ok(self
            .request_confirmation(
                ConsoleAction::DisableSubAdmin {
                    username: username.to_string(),
                },
                format!("Disable {username}?"),
            )
            .await)
    }

    pub async fn request_delete_sub_admin(&self, username: &str) -> Result<ConfirmationPrompt, AppError> {
        self.require_super()?;
        Ok(self
            .request_confirmation(
                ConsoleAction::DeleteSubAdmin {
                    username: username.to_string(),
                },
                format!("Delete {username}? This cannot be undone."),
            )
            .await)
    }

    pub(super) async fn disable_sub_admin(&self, username: &str) {
        match self.api.disable_sub_admin(&self.token, username).await {
            Ok(()) => self.load_admins().await,
            Err(e) => {
                let message = e.message("Failed to disable sub-admin");
                self.settle(|s| s.admins.fail(message)).await;
            }
        }
    }

    pub(super) async fn delete_sub_admin(&self, username: &str) {
        match self.api.delete_sub_admin(&self.token, username).await {
            Ok(()) => self.load_admins().await,
            Err(e) => {
                let message = e.message("Failed to delete sub-admin");
                self.settle(|s| s.admins.fail(message)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::super::testing::console_against;
    use super::*;
    use axum::{
        extract::Path,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;

    #[tokio::test]
    async fn test_sub_admin_cannot_manage_admins() {
        let console = console_against(Router::new(), "sub_admin").await;
        assert!(matches!(
            console.request_delete_sub_admin("ops").await,
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            console
                .create_sub_admin(AdminCredentials {
                    username: "ops".into(),
                    password: "pw".into(),
                })
                .await,
            Err(AppError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn test_disable_runs_after_confirmation() {
        let disabled = Arc::new(Mutex::new(Vec::<String>::new()));
        let seen = disabled.clone();
        let router = Router::new()
            .route(
                "/api/admin/sub-admins",
                get(|| async { Json(json!({"rows": [{"username": "ops", "is_active": false}]})) }),
            )
            .route(
                "/api/admin/sub-admins/:username/disable",
                post(move |Path(username): Path<String>| {
                    let seen = seen.clone();
                    async move {
                        seen.lock().unwrap().push(username);
                        Json(json!({}))
                    }
                }),
            );
        let console = console_against(router, "super_admin").await;
        let prompt = console.request_disable_sub_admin("ops").await.unwrap();
        assert_eq!(prompt.prompt, "Disable ops?");
        assert!(disabled.lock().unwrap().is_empty());

        console.confirm(prompt.token).await.unwrap();
        assert_eq!(disabled.lock().unwrap().as_slice(), ["ops".to_string()]);
        let snap = console.snapshot().await;
        assert!(!snap.state.admins.rows[0].is_active);
    }

    #[tokio::test]
    async fn test_blank_credentials_are_refused() {
        let console = console_against(Router::new(), "super_admin").await;
        console
            .create_sub_admin(AdminCredentials {
                username: "  ".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();
        assert_eq!(
            console.snapshot().await.state.admins.error.as_deref(),
            Some("Username and password are required")
        );
    }
}
