//! Registry of open admin consoles.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::console::AdminConsole;
use crate::errors::AppError;

pub struct ConsoleRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<AdminConsole>>>,
    ttl: Duration,
}

impl ConsoleRegistry {
    /// Consoles idle for longer than `ttl` are dropped.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn open(&self, console: AdminConsole) -> (Uuid, Arc<AdminConsole>) {
        self.sweep().await;
        let id = Uuid::new_v4();
        let console = Arc::new(console);
        self.sessions.write().await.insert(id, console.clone());
        info!(session = %id, username = %console.username(), "console session opened");
        (id, console)
    }

    /// Looks up a console and marks it as used.
    pub async fn get(&self, id: Uuid) -> Result<Arc<AdminConsole>, AppError> {
        let now = Utc::now();
        let console = self
            .sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(AppError::SessionExpired)?;

        if now - console.last_seen() > self.ttl {
            self.close(id).await;
            return Err(AppError::SessionExpired);
        }
        console.touch(now);
        Ok(console)
    }

    pub async fn close(&self, id: Uuid) -> bool {
        match self.sessions.write().await.remove(&id) {
            Some(console) => {
                console.close();
                info!(session = %id, "console session closed");
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn sweep(&self) {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|id, console| {
            let live = now - console.last_seen() <= self.ttl;
            if !live {
                console.close();
                info!(session = %id, "console session expired");
            }
            live
        });
    }
}
