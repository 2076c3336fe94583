//! Two-phase confirmation for destructive console actions.
//!
//! Asking for a destructive action parks it under a random token and returns
//! the prompt to show. Nothing happens until the token is confirmed.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

pub const CONFIRMATION_TTL_MINUTES: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationPrompt {
    pub token: Uuid,
    pub prompt: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct Pending<A> {
    action: A,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Confirmations<A> {
    pending: HashMap<Uuid, Pending<A>>,
}

impl<A> Default for Confirmations<A> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }
}

impl<A> Confirmations<A> {
    pub fn request(&mut self, action: A, prompt: String, now: DateTime<Utc>) -> ConfirmationPrompt {
        self.pending.retain(|_, p| p.expires_at > now);

        let token = Uuid::new_v4();
        let expires_at = now + Duration::minutes(CONFIRMATION_TTL_MINUTES);
        self.pending.insert(token, Pending { action, expires_at });
        ConfirmationPrompt {
            token,
            prompt,
            expires_at,
        }
    }

    /// Removes and returns the parked action if the token is known and fresh.
    pub fn take(&mut self, token: Uuid, now: DateTime<Utc>) -> Option<A> {
        let pending = self.pending.remove(&token)?;
        (pending.expires_at > now).then_some(pending.action)
    }

    pub fn cancel(&mut self, token: Uuid) -> bool {
        self.pending.remove(&token).is_some()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_runs_once() {
        let now = Utc::now();
        let mut c = Confirmations::default();
        let prompt = c.request("delete-job", "Delete this job posting?".into(), now);
        assert_eq!(prompt.prompt, "Delete this job posting?");
        assert_eq!(c.take(prompt.token, now), Some("delete-job"));
        assert_eq!(c.take(prompt.token, now), None);
    }

    #[test]
    fn test_expired_token_is_refused() {
        let now = Utc::now();
        let mut c = Confirmations::default();
        let prompt = c.request(1, "Reject 3 candidate(s)?".into(), now);
        let later = now + Duration::minutes(CONFIRMATION_TTL_MINUTES + 1);
        assert_eq!(c.take(prompt.token, later), None);
        assert_eq!(c.pending_count(), 0);
    }

    #[test]
    fn test_cancel() {
        let now = Utc::now();
        let mut c = Confirmations::default();
        let prompt = c.request((), "Disable ops?".into(), now);
        assert!(c.cancel(prompt.token));
        assert!(!c.cancel(prompt.token));
    }

    #[test]
    fn test_new_requests_sweep_expired_ones() {
        let now = Utc::now();
        let mut c = Confirmations::default();
        c.request(1, "a".into(), now);
        c.request(2, "b".into(), now + Duration::minutes(CONFIRMATION_TTL_MINUTES + 1));
        assert_eq!(c.pending_count(), 1);
    }
}
