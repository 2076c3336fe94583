use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::candidate::Round;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodingTemplate {
    pub template_id: String,
    pub title: String,
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodingProblem {
    pub problem_id: String,
    pub template_id: Option<String>,
    pub title: String,
    pub statement: Option<String>,
    pub difficulty: Option<String>,
    pub starter_python: Option<String>,
    pub starter_javascript: Option<String>,
}

/// Body of `POST /admin/coding/problems`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodingProblemDraft {
    pub template_id: String,
    #[serde(default)]
    pub title_override: String,
}

/// Body of `PUT /admin/rounds/:id/coding`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundCodingUpdate {
    pub is_coding: bool,
    pub coding_problem_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodingAssignment {
    pub candidate_id: String,
    pub full_name: Option<String>,
    pub problem_id: String,
    pub problem_title: Option<String>,
    pub assigned_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestResult {
    pub name: Option<String>,
    pub passed: bool,
    pub output: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodingSubmission {
    pub submission_id: String,
    pub candidate_id: String,
    pub problem_id: Option<String>,
    pub language: String,
    pub code: Option<String>,
    pub passed: Option<u32>,
    pub total: Option<u32>,
    pub results: Vec<TestResult>,
    pub submitted_at: Option<String>,
}

/// `GET /candidate/coding` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateCoding {
    pub round: Option<Round>,
    pub problem: Option<CodingProblem>,
}

/// Body of `POST /candidate/coding/{run,submit}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSubmission {
    pub language: String,
    pub code: String,
}

/// Run and submit results are relayed as the sandbox reports them.
pub type RunOutcome = Value;
