//! Candidate list with local filters and a multi-selection that survives
//! reloads.

use serde::{Deserialize, Serialize};

use super::panel::{PanelState, Ticket};
use crate::models::candidate::Candidate;

/// Filters on the candidate table. `None` (or `"all"` on the wire) means no
/// filter. Only `job_slug` is sent to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateFilters {
    pub job_slug: Option<String>,
    pub status: Option<String>,
    pub round: Option<String>,
}

impl CandidateFilters {
    pub fn normalized(self) -> Self {
        Self {
            job_slug: normalize_filter(self.job_slug),
            status: normalize_filter(self.status),
            round: normalize_filter(self.round),
        }
    }

    fn matches(&self, candidate: &Candidate) -> bool {
        let status_ok = self
            .status
            .as_deref()
            .map_or(true, |s| candidate.status.as_str() == s);
        let round_ok = self
            .round
            .as_deref()
            .map_or(true, |r| candidate.current_round == r);
        status_ok && round_ok
    }
}

pub fn normalize_filter(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "all")
}

/// What an optimistic single-candidate action took away from the view.
#[derive(Debug, Clone)]
pub struct Detached {
    opened: Option<Candidate>,
    was_selected: bool,
    candidate_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CandidatePipeline {
    /// Rows are the filtered view; `selected` is the opened candidate.
    pub panel: PanelState<Candidate>,
    pub filters: CandidateFilters,
    pub selection: Vec<String>,
}

impl CandidatePipeline {
    /// Applies a listing response: filters it locally and drops selected ids
    /// that are no longer in the unfiltered list.
    pub fn apply_listing(&mut self, ticket: Ticket, result: Result<Vec<Candidate>, String>) -> bool {
        if !self.panel.is_current(ticket) {
            return false;
        }
        let result = result.map(|all| {
            self.selection
                .retain(|id| all.iter().any(|c| &c.candidate_id == id));
            all.into_iter().filter(|c| self.filters.matches(c)).collect()
        });
        self.panel.finish_rows(ticket, result)
    }

    pub fn toggle(&mut self, candidate_id: &str, checked: bool) {
        let present = self.selection.iter().any(|id| id == candidate_id);
        if checked && !present {
            self.selection.push(candidate_id.to_string());
        } else if !checked {
            self.selection.retain(|id| id != candidate_id);
        }
    }

    /// Selects or clears every visible row.
    pub fn toggle_all(&mut self, checked: bool) {
        self.selection = if checked {
            self.panel.rows.iter().map(|c| c.candidate_id.clone()).collect()
        } else {
            Vec::new()
        };
    }

    pub fn open(&mut self, candidate_id: &str) -> bool {
        self.panel.select_where(|c| c.candidate_id == candidate_id)
    }

    /// Clears the whole selection ahead of a bulk request.
    pub fn take_selection(&mut self) -> Vec<String> {
        std::mem::take(&mut self.selection)
    }

    /// Puts a selection back after a failed bulk request.
    pub fn restore_selection(&mut self, ids: Vec<String>) {
        self.selection = ids;
    }

    /// Clears one candidate from the opened slot and the selection ahead of a
    /// single-candidate request.
    pub fn detach(&mut self, candidate_id: &str) -> Detached {
        let opened = if self.opened_id() == Some(candidate_id) {
            self.panel.selected.take()
        } else {
            None
        };
        let was_selected = self.selection.iter().any(|id| id == candidate_id);
        self.selection.retain(|id| id != candidate_id);
        Detached {
            opened,
            was_selected,
            candidate_id: candidate_id.to_string(),
        }
    }

    pub fn reattach(&mut self, detached: Detached) {
        if detached.opened.is_some() && self.panel.selected.is_none() {
            self.panel.selected = detached.opened;
        }
        if detached.was_selected && !self.selection.contains(&detached.candidate_id) {
            self.selection.push(detached.candidate_id);
        }
    }

    pub fn opened_id(&self) -> Option<&str> {
        self.panel.selected.as_ref().map(|c| c.candidate_id.as_str())
    }

    pub fn display_name(&self, candidate_id: &str) -> String {
        self.panel
            .rows
            .iter()
            .chain(self.panel.selected.iter())
            .find(|c| c.candidate_id == candidate_id)
            .map(|c| c.full_name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "this candidate".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::CandidateStatus;

    fn candidate(id: &str, status: CandidateStatus, round: &str) -> Candidate {
        Candidate {
            candidate_id: id.into(),
            full_name: format!("Name {id}"),
            status,
            current_round: round.into(),
            ..Default::default()
        }
    }

    fn loaded(filters: CandidateFilters) -> CandidatePipeline {
        let mut p = CandidatePipeline {
            filters,
            ..Default::default()
        };
        let t = p.panel.begin();
        p.apply_listing(
            t,
            Ok(vec![
                candidate("c-1", CandidateStatus::Active, "round-1"),
                candidate("c-2", CandidateStatus::Rejected, "round-1"),
                candidate("c-3", CandidateStatus::Active, "round-2"),
            ]),
        );
        p
    }

    #[test]
    fn test_filters_apply_locally() {
        let p = loaded(CandidateFilters {
            status: Some("Active".into()),
            round: Some("round-1".into()),
            ..Default::default()
        });
        let ids: Vec<_> = p.panel.rows.iter().map(|c| c.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["c-1"]);
    }

    #[test]
    fn test_all_means_no_filter() {
        let filters = CandidateFilters {
            job_slug: Some("all".into()),
            status: Some(" ".into()),
            round: Some("round-2".into()),
        }
        .normalized();
        assert_eq!(filters.job_slug, None);
        assert_eq!(filters.status, None);
        assert_eq!(filters.round.as_deref(), Some("round-2"));
    }

    #[test]
    fn test_selection_pruned_against_unfiltered_rows() {
        let mut p = loaded(CandidateFilters {
            status: Some("Active".into()),
            ..Default::default()
        });
        p.selection = vec!["c-2".into(), "gone".into()];
        let t = p.panel.begin();
        p.apply_listing(
            t,
            Ok(vec![
                candidate("c-1", CandidateStatus::Active, "round-1"),
                candidate("c-2", CandidateStatus::Rejected, "round-1"),
            ]),
        );
        // c-2 is hidden by the filter but still exists, so it stays selected.
        assert_eq!(p.selection, vec!["c-2".to_string()]);
    }

    #[test]
    fn test_toggle_and_toggle_all() {
        let mut p = loaded(CandidateFilters::default());
        p.toggle("c-1", true);
        p.toggle("c-1", true);
        assert_eq!(p.selection, vec!["c-1".to_string()]);
        p.toggle("c-1", false);
        assert!(p.selection.is_empty());
        p.toggle_all(true);
        assert_eq!(p.selection.len(), 3);
        p.toggle_all(false);
        assert!(p.selection.is_empty());
    }

    #[test]
    fn test_take_and_restore_selection() {
        let mut p = loaded(CandidateFilters::default());
        p.toggle_all(true);
        let taken = p.take_selection();
        assert!(p.selection.is_empty());
        p.restore_selection(taken);
        assert_eq!(p.selection.len(), 3);
    }

    #[test]
    fn test_detach_and_reattach() {
        let mut p = loaded(CandidateFilters::default());
        p.open("c-1");
        p.toggle("c-1", true);
        p.toggle("c-3", true);
        let detached = p.detach("c-1");
        assert_eq!(p.opened_id(), None);
        assert_eq!(p.selection, vec!["c-3".to_string()]);
        p.reattach(detached);
        assert_eq!(p.opened_id(), Some("c-1"));
        assert!(p.selection.contains(&"c-1".to_string()));
    }

    #[test]
    fn test_stale_listing_leaves_selection_alone() {
        let mut p = loaded(CandidateFilters::default());
        p.selection = vec!["c-1".into()];
        let stale = p.panel.begin();
        let _fresh = p.panel.begin();
        assert!(!p.apply_listing(stale, Ok(vec![])));
        assert_eq!(p.selection, vec!["c-1".to_string()]);
    }

    #[test]
    fn test_display_name_fallback() {
        let p = loaded(CandidateFilters::default());
        assert_eq!(p.display_name("c-2"), "Name c-2");
        assert_eq!(p.display_name("nope"), "this candidate");
    }
}
