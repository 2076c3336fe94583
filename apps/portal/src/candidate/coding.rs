use serde::{Deserialize, Serialize};

use crate::models::candidate::Round;
use crate::models::coding::{CandidateCoding, CodingProblem};

pub const CODE_SUBMIT_PROMPT: &str = "Submit final solution? You can only submit once.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Python,
    Javascript,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Javascript => "javascript",
        }
    }

    fn starter(self, problem: Option<&CodingProblem>) -> &str {
        let starter = problem.and_then(|p| match self {
            Language::Python => p.starter_python.as_deref(),
            Language::Javascript => p.starter_javascript.as_deref(),
        });
        starter.unwrap_or("")
    }
}

/// The editor: selected language and current code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub language: Language,
    pub code: String,
}

impl Workspace {
    pub fn start(problem: Option<&CodingProblem>) -> Self {
        Self {
            language: Language::Python,
            code: Language::Python.starter(problem).to_string(),
        }
    }

    /// Untouched code (empty or still the current starter) is swapped for the
    /// new language's starter; edited code is kept.
    pub fn switch_language(&mut self, next: Language, problem: Option<&CodingProblem>) {
        let untouched = self.code.is_empty() || self.code == self.language.starter(problem);
        if untouched {
            self.code = next.starter(problem).to_string();
        }
        self.language = next;
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodeRequest {
    pub language: Language,
    pub code: String,
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageSwitch {
    pub workspace: Workspace,
    pub language: Language,
}

#[derive(Debug, Clone, Serialize)]
pub struct CodingView {
    pub round: Option<Round>,
    pub problem: Option<CodingProblem>,
    pub workspace: Workspace,
    pub submit_prompt: &'static str,
}

impl From<CandidateCoding> for CodingView {
    fn from(coding: CandidateCoding) -> Self {
        Self {
            workspace: Workspace::start(coding.problem.as_ref()),
            round: coding.round,
            problem: coding.problem,
            submit_prompt: CODE_SUBMIT_PROMPT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem() -> CodingProblem {
        CodingProblem {
            problem_id: "p-1".into(),
            starter_python: Some("def solve():\n    pass\n".into()),
            starter_javascript: Some("function solve() {}\n".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_workspace_starts_in_python() {
        let ws = Workspace::start(Some(&problem()));
        assert_eq!(ws.language, Language::Python);
        assert_eq!(ws.code, "def solve():\n    pass\n");
        assert_eq!(Workspace::start(None).code, "");
    }

    #[test]
    fn test_switch_replaces_untouched_starter() {
        let p = problem();
        let mut ws = Workspace::start(Some(&p));
        ws.switch_language(Language::Javascript, Some(&p));
        assert_eq!(ws.language, Language::Javascript);
        assert_eq!(ws.code, "function solve() {}\n");
    }

    #[test]
    fn test_switch_keeps_edited_code() {
        let p = problem();
        let mut ws = Workspace::start(Some(&p));
        ws.code.push_str("# my work\n");
        let edited = ws.code.clone();
        ws.switch_language(Language::Javascript, Some(&p));
        assert_eq!(ws.code, edited);
        assert_eq!(ws.language.as_str(), "javascript");
    }

    #[test]
    fn test_switch_from_empty_code() {
        let p = problem();
        let mut ws = Workspace {
            language: Language::Javascript,
            code: String::new(),
        };
        ws.switch_language(Language::Python, Some(&p));
        assert_eq!(ws.code, "def solve():\n    pass\n");
    }
}
