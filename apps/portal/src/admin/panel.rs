//! Per-panel view state shared by every admin console resource.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Error,
}

/// Stamp handed out when a panel request starts. Only the newest ticket may
/// write its result back, so a slow response can never overwrite a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Serialize)]
pub struct PanelState<T> {
    pub status: LoadStatus,
    pub error: Option<String>,
    pub rows: Vec<T>,
    pub selected: Option<T>,
    #[serde(skip)]
    generation: u64,
}

impl<T> Default for PanelState<T> {
    fn default() -> Self {
        Self {
            status: LoadStatus::Idle,
            error: None,
            rows: Vec::new(),
            selected: None,
            generation: 0,
        }
    }
}

impl<T> PanelState<T> {
    /// Marks the panel as loading and returns the ticket for this request.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.status = LoadStatus::Loading;
        self.error = None;
        Ticket(self.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Stores a listing result. Returns `false` when the ticket is stale and
    /// the result was dropped. Rows survive a failed reload.
    pub fn finish_rows(&mut self, ticket: Ticket, result: Result<Vec<T>, String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        match result {
            Ok(rows) => {
                self.rows = rows;
                self.status = LoadStatus::Idle;
                self.error = None;
            }
            Err(message) => {
                self.status = LoadStatus::Error;
                self.error = Some(message);
            }
        }
        true
    }

    /// Stores the outcome of a request that does not replace the rows.
    pub fn finish(&mut self, ticket: Ticket, result: Result<(), String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        match result {
            Ok(()) => {
                self.status = LoadStatus::Idle;
                self.error = None;
            }
            Err(message) => {
                self.status = LoadStatus::Error;
                self.error = Some(message);
            }
        }
        true
    }

    /// Shows an inline error without touching the load status.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn select(&mut self, row: Option<T>) {
        self.selected = row;
    }
}

impl<T: Clone> PanelState<T> {
    /// Selects the first row matching `pred`; returns whether one was found.
    pub fn select_where(&mut self, pred: impl Fn(&T) -> bool) -> bool {
        let found = self.rows.iter().find(|row| pred(row)).cloned();
        let hit = found.is_some();
        self.selected = found;
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_marks_loading_and_clears_error() {
        let mut panel: PanelState<u32> = PanelState::default();
        panel.fail("old");
        panel.begin();
        assert_eq!(panel.status, LoadStatus::Loading);
        assert_eq!(panel.error, None);
    }

    #[test]
    fn test_stale_ticket_is_dropped() {
        let mut panel = PanelState::default();
        let first = panel.begin();
        let second = panel.begin();
        assert!(panel.finish_rows(second, Ok(vec![2])));
        assert!(!panel.finish_rows(first, Ok(vec![1])));
        assert_eq!(panel.rows, vec![2]);
        assert_eq!(panel.status, LoadStatus::Idle);
    }

    #[test]
    fn test_failed_reload_keeps_rows() {
        let mut panel = PanelState::default();
        let t = panel.begin();
        panel.finish_rows(t, Ok(vec![1, 2]));
        let t = panel.begin();
        panel.finish_rows(t, Err("Failed to load jobs".into()));
        assert_eq!(panel.rows, vec![1, 2]);
        assert_eq!(panel.status, LoadStatus::Error);
        assert_eq!(panel.error.as_deref(), Some("Failed to load jobs"));
    }

    #[test]
    fn test_select_where() {
        let mut panel = PanelState::default();
        let t = panel.begin();
        panel.finish_rows(t, Ok(vec![10, 20, 30]));
        assert!(panel.select_where(|v| *v == 20));
        assert_eq!(panel.selected, Some(20));
        assert!(!panel.select_where(|v| *v == 99));
        assert_eq!(panel.selected, None);
    }

    #[test]
    fn test_fail_keeps_status() {
        let mut panel: PanelState<u32> = PanelState::default();
        panel.fail("Failed to promote");
        assert_eq!(panel.status, LoadStatus::Idle);
        assert_eq!(panel.error.as_deref(), Some("Failed to promote"));
    }
}
