use serde::Serialize;

pub const SKILLS: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "React",
    "Node.js",
    "Python",
    "FastAPI",
    "MongoDB",
    "PostgreSQL",
    "Docker",
    "AWS",
    "CI/CD",
    "UI/UX",
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Avatar {
    pub key: &'static str,
    pub label: &'static str,
}

pub const AVATARS: &[Avatar] = &[
    Avatar { key: "pixel-1", label: "Neo Pixel" },
    Avatar { key: "pixel-2", label: "Teal Sprite" },
    Avatar { key: "pixel-3", label: "Cosmic Dev" },
    Avatar { key: "pixel-4", label: "Orange Boost" },
    Avatar { key: "pixel-5", label: "Indigo Shift" },
    Avatar { key: "pixel-6", label: "White Hat" },
];

pub const DEFAULT_AVATAR: &str = "pixel-2";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuizOption {
    pub key: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PersonaQuestion {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: [QuizOption; 3],
}

/// The four persona questions asked before the wizard levels.
pub const PERSONA_QUIZ: &[PersonaQuestion] = &[
    PersonaQuestion {
        id: "style",
        prompt: "Your coding style?",
        options: [
            QuizOption { key: "A", text: "Elegant & clean" },
            QuizOption { key: "B", text: "Bold & innovative" },
            QuizOption { key: "C", text: "Fast & fearless" },
        ],
    },
    PersonaQuestion {
        id: "bug",
        prompt: "A bug appears at 2am. You…",
        options: [
            QuizOption { key: "A", text: "Reproduce + write a tiny test" },
            QuizOption { key: "B", text: "Dive deep, find root cause" },
            QuizOption { key: "C", text: "Patch it, ship it, monitor" },
        ],
    },
    PersonaQuestion {
        id: "team",
        prompt: "In a team project you’re the…",
        options: [
            QuizOption { key: "A", text: "Architect of clarity" },
            QuizOption { key: "B", text: "Idea catalyst" },
            QuizOption { key: "C", text: "Momentum engine" },
        ],
    },
    PersonaQuestion {
        id: "vibe",
        prompt: "Pick a vibe:",
        options: [
            QuizOption { key: "A", text: "Minimalist mastery" },
            QuizOption { key: "B", text: "Creative chaos (controlled)" },
            QuizOption { key: "C", text: "Speed-run to impact" },
        ],
    },
];

/// Whether `key` is one of the options offered for `question_id`.
pub fn is_known_answer(question_id: &str, key: &str) -> bool {
    PERSONA_QUIZ
        .iter()
        .find(|q| q.id == question_id)
        .is_some_and(|q| q.options.iter().any(|o| o.key == key))
}

pub fn is_known_avatar(key: &str) -> bool {
    AVATARS.iter().any(|a| a.key == key)
}

/// Everything the browser needs to render the quest.
#[derive(Debug, Clone, Serialize)]
pub struct QuestCatalog {
    pub skills: &'static [&'static str],
    pub avatars: &'static [Avatar],
    pub quiz: &'static [PersonaQuestion],
}

pub fn catalog() -> QuestCatalog {
    QuestCatalog {
        skills: SKILLS,
        avatars: AVATARS,
        quiz: PERSONA_QUIZ,
    }
}
