use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CandidateStatus {
    #[default]
    Active,
    Pending,
    Rejected,
    Selected,
    Completed,
    #[serde(other)]
    Unknown,
}

impl CandidateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::Active => "Active",
            CandidateStatus::Pending => "Pending",
            CandidateStatus::Rejected => "Rejected",
            CandidateStatus::Selected => "Selected",
            CandidateStatus::Completed => "Completed",
            CandidateStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub candidate_id: String,
    pub full_name: String,
    pub email: String,
    pub job_slug: Option<String>,
    pub job_title: Option<String>,
    pub current_round: String,
    pub round1_score: Option<f64>,
    pub round2_score: Option<f64>,
    pub round3_score: Option<f64>,
    pub round4_score: Option<f64>,
    pub total_score: Option<f64>,
    pub status: CandidateStatus,
    pub quiz_status: Option<String>,
    pub is_coding: bool,
}

impl Candidate {
    pub fn quiz_completed(&self) -> bool {
        self.quiz_status.as_deref() == Some("Completed")
    }
}

/// A named hiring stage and the tasks it unlocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Round {
    pub round_id: String,
    pub round_name: String,
    pub round_description: Option<String>,
    pub is_quiz: bool,
    pub is_coding: bool,
    pub coding_problem_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EvaluationStatus {
    #[default]
    Pass,
    Fail,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationScore {
    pub round_name: String,
    pub score: f64,
    pub status: EvaluationStatus,
    pub evaluator_name: String,
    pub comments: String,
    pub timestamp: Option<String>,
}

/// Body of `POST /admin/candidates/:id/score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub candidate_id: String,
    pub score: f64,
    pub evaluator_name: String,
    pub comments: String,
    pub status: EvaluationStatus,
}

/// Final hiring decision. `Completed` is the "not selected" outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalDecision {
    Selected,
    Completed,
}

impl FinalDecision {
    pub fn label(self) -> &'static str {
        match self {
            FinalDecision::Selected => "Select",
            FinalDecision::Completed => "Mark not selected",
        }
    }
}

/// `GET /candidate/me` bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateMe {
    pub candidate: Option<Candidate>,
    pub round: Option<Round>,
}
