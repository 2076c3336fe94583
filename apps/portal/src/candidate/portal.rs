use serde::Serialize;

use crate::models::candidate::{Candidate, CandidateMe, CandidateStatus, Round};

/// Which next steps the portal offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Affordances {
    pub start_quiz: bool,
    pub quiz_submitted: bool,
    pub start_coding: bool,
    pub offline_round: bool,
}

impl Affordances {
    pub fn for_round(candidate: &Candidate, round: &Round) -> Self {
        let closed = matches!(
            candidate.status,
            CandidateStatus::Rejected | CandidateStatus::Selected
        );
        Self {
            start_quiz: round.is_quiz && !candidate.quiz_completed() && !closed,
            quiz_submitted: round.is_quiz && candidate.quiz_completed(),
            start_coding: round.is_coding && candidate.status == CandidateStatus::Active,
            offline_round: !round.is_quiz && !round.is_coding,
        }
    }
}

/// One-line status for the dashboard. Empty until the candidate is known.
pub fn status_message(candidate: Option<&Candidate>, round: Option<&Round>) -> &'static str {
    let Some(candidate) = candidate else {
        return "";
    };
    match candidate.status {
        CandidateStatus::Rejected => return "Your application is no longer in process.",
        CandidateStatus::Selected => return "Congratulations — you’ve been selected!",
        _ => {}
    }
    if round.is_some_and(|r| r.is_quiz) {
        return match candidate.quiz_status.as_deref() {
            Some("Completed") => "Quiz submitted. Please wait for evaluation.",
            Some("In Progress") => "Quiz is in progress. You can submit once.",
            _ => "This round includes an online quiz.",
        };
    }
    "Please wait for the next instruction. This round is evaluated offline."
}

#[derive(Debug, Clone, Serialize)]
pub struct PortalView {
    pub candidate: Option<Candidate>,
    pub round: Option<Round>,
    pub status_message: &'static str,
    pub affordances: Option<Affordances>,
}

impl From<CandidateMe> for PortalView {
    fn from(me: CandidateMe) -> Self {
        let affordances = match (&me.candidate, &me.round) {
            (Some(candidate), Some(round)) => Some(Affordances::for_round(candidate, round)),
            _ => None,
        };
        Self {
            status_message: status_message(me.candidate.as_ref(), me.round.as_ref()),
            affordances,
            candidate: me.candidate,
            round: me.round,
        }
    }
}
