//! Persona and XP derivation for the Developer Quest.
//!
//! Both are pure functions of the quiz answers and wizard inputs and are
//! recomputed on every step; nothing here touches the backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::is_known_answer;
use crate::bullets::{parse_bullets, WIZARD_BULLET_CAP};

pub const BASE_XP: u32 = 180;
pub const XP_PER_QUIZ_ANSWER: u32 = 70;
const SKILL_XP: u32 = 25;
const SKILL_XP_CAP: u32 = 300;
const EXPERIENCE_XP_PER_YEAR: f64 = 60.0;
const EXPERIENCE_XP_CAP: u32 = 240;
const STRENGTH_XP: u32 = 45;
const STRENGTH_XP_CAP: u32 = 250;
const WEAKNESS_XP: u32 = 25;
const WEAKNESS_XP_CAP: u32 = 150;
const PROJECTS_XP_CAP: u32 = 120;
const TEASER_XP: u32 = 120;
const TEASER_MIN_CHARS: usize = 8;

/// Quiz question id → selected option key.
pub type QuizAnswers = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Persona {
    #[serde(rename = "Clean Code Paladin")]
    CleanCodePaladin,
    #[serde(rename = "Innovation Rogue")]
    InnovationRogue,
    #[serde(rename = "Speedrunner Mage")]
    SpeedrunnerMage,
}

impl Persona {
    pub fn label(self) -> &'static str {
        match self {
            Persona::CleanCodePaladin => "Clean Code Paladin",
            Persona::InnovationRogue => "Innovation Rogue",
            Persona::SpeedrunnerMage => "Speedrunner Mage",
        }
    }
}

/// Majority vote over A/B/C. Ties go to the earlier key in A, B, C order;
/// answers outside the quiz catalog are ignored; no answers yields A.
pub fn pick_persona(answers: &QuizAnswers) -> Persona {
    let mut counts = [("A", 0u32), ("B", 0), ("C", 0)];
    for (_, key) in answers.iter().filter(|(id, key)| is_known_answer(id, key)) {
        if let Some(slot) = counts.iter_mut().find(|(k, _)| *k == key.as_str()) {
            slot.1 += 1;
        }
    }

    let mut top = counts[0];
    for entry in &counts[1..] {
        if entry.1 > top.1 {
            top = *entry;
        }
    }

    match top.0 {
        "A" => Persona::CleanCodePaladin,
        "B" => Persona::InnovationRogue,
        _ => Persona::SpeedrunnerMage,
    }
}

/// The wizard fields that feed XP.
#[derive(Debug, Clone, Copy, Default)]
pub struct XpInputs<'a> {
    pub quiz_answers: Option<&'a QuizAnswers>,
    pub skills: &'a [String],
    pub experience_years: f64,
    pub strengths_text: &'a str,
    pub weaknesses_text: &'a str,
    pub projects: &'a str,
    pub teaser_answer: &'a str,
}

pub fn compute_xp(inputs: &XpInputs<'_>) -> u32 {
    let quiz_count = inputs.quiz_answers.map_or(0, |answers| {
        answers
            .iter()
            .filter(|(id, key)| is_known_answer(id, key))
            .count()
    }) as u32;
    let base = BASE_XP + quiz_count * XP_PER_QUIZ_ANSWER;

    let skills = (inputs.skills.len() as u32 * SKILL_XP).min(SKILL_XP_CAP);
    let experience = round_clamped(inputs.experience_years * EXPERIENCE_XP_PER_YEAR, EXPERIENCE_XP_CAP);
    let strengths = (parse_bullets(inputs.strengths_text, WIZARD_BULLET_CAP).len() as u32 * STRENGTH_XP)
        .min(STRENGTH_XP_CAP);
    let weaknesses = (parse_bullets(inputs.weaknesses_text, WIZARD_BULLET_CAP).len() as u32 * WEAKNESS_XP)
        .min(WEAKNESS_XP_CAP);
    let projects_len = inputs.projects.trim().chars().count() as f64;
    let projects = round_clamped(projects_len / 40.0 * 10.0, PROJECTS_XP_CAP);
    let teaser = if inputs.teaser_answer.trim().chars().count() >= TEASER_MIN_CHARS {
        TEASER_XP
    } else {
        0
    };

    base + skills + experience + strengths + weaknesses + projects + teaser
}

/// Base XP shown when the persona is unlocked after the full quiz.
pub fn quiz_unlock_xp(questions: usize) -> u32 {
    BASE_XP + questions as u32 * XP_PER_QUIZ_ANSWER
}

fn round_clamped(value: f64, cap: u32) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value.round() as u32).min(cap)
}
