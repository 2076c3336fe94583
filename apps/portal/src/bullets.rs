//! Free-text bullet lists, as typed into multi-line form fields.

/// Strengths and weaknesses in the Developer Quest wizard.
pub const WIZARD_BULLET_CAP: usize = 7;
/// Requirements and bonus lists in the current admin job form.
pub const JOB_FORM_BULLET_CAP: usize = 30;
/// Requirements and bonus lists in the legacy admin job form.
pub const LEGACY_JOB_FORM_BULLET_CAP: usize = 20;

/// Splits `text` into bullets: one per line, leading `-`/`•`/whitespace
/// stripped, blank lines dropped, at most `cap` entries. Lines past the cap
/// are silently discarded.
pub fn parse_bullets(text: &str, cap: usize) -> Vec<String> {
    text.split('\n')
        .map(|line| {
            line.trim_start_matches(|c: char| c == '-' || c == '•' || c.is_whitespace())
                .trim()
        })
        .filter(|line| !line.is_empty())
        .take(cap)
        .map(str::to_string)
        .collect()
}

/// Renders a list back into editable text; an empty list becomes `"- "` so
/// the form field starts with a bullet prompt.
pub fn to_bullets_text(items: &[String]) -> String {
    if items.is_empty() {
        return "- ".to_string();
    }
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_markers_and_blank_lines() {
        assert_eq!(
            parse_bullets("- a\n• b\n  c\n\n- d", LEGACY_JOB_FORM_BULLET_CAP),
            vec!["a", "b", "c", "d"]
        );
    }

    #[test]
    fn test_windows_line_endings() {
        assert_eq!(parse_bullets("- one\r\n- two\r\n", 20), vec!["one", "two"]);
    }

    #[test]
    fn test_cap_is_lossy() {
        let text = (1..=10).map(|i| format!("- item {i}")).collect::<Vec<_>>().join("\n");
        let parsed = parse_bullets(&text, WIZARD_BULLET_CAP);
        assert_eq!(parsed.len(), 7);
        assert_eq!(parsed.last().map(String::as_str), Some("item 7"));
    }

    #[test]
    fn test_prompt_only_text_is_empty() {
        assert!(parse_bullets("- ", WIZARD_BULLET_CAP).is_empty());
        assert!(parse_bullets("", WIZARD_BULLET_CAP).is_empty());
    }

    #[test]
    fn test_inner_dashes_survive() {
        assert_eq!(parse_bullets("-- well-tested code", 20), vec!["well-tested code"]);
    }

    #[test]
    fn test_to_bullets_text() {
        assert_eq!(to_bullets_text(&[]), "- ");
        assert_eq!(
            to_bullets_text(&["Rust".to_string(), "SQL".to_string()]),
            "- Rust\n- SQL"
        );
    }

    #[test]
    fn test_job_form_caps_differ() {
        let text = (1..=40).map(|i| format!("req {i}")).collect::<Vec<_>>().join("\n");
        assert_eq!(parse_bullets(&text, JOB_FORM_BULLET_CAP).len(), 30);
        assert_eq!(parse_bullets(&text, LEGACY_JOB_FORM_BULLET_CAP).len(), 20);
    }
}
