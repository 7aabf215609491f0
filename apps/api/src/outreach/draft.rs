//! Splits model email text into subject and body and enforces the closing line.
//!
//! Structure the prompt asks for:
//! ```text
//! Subject: <subject>
//!
//! <body>
//! Sincerely, <name>
//! ```
//! The subject is taken from the first line with a case-insensitive `subject:` prefix.
//! The closing is checked and, if the model drifted, repaired.

use serde::Serialize;
use tracing::warn;

pub const DEFAULT_SUBJECT: &str = "Cold Email";
const SUBJECT_PREFIX: &str = "subject:";
const CLOSING_WORD: &str = "Sincerely,";
/// A line longer than this is prose, not a valediction like "Best regards,".
const MAX_VALEDICTION_LEN: usize = 40;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
    /// True when the body's sign-off had to be rewritten or appended.
    pub closing_repaired: bool,
}

impl EmailDraft {
    /// Builds a draft from raw model output for a candidate called `name`.
    pub fn from_model_output(email_text: &str, name: &str) -> Self {
        let (subject, body) = split_subject_body(email_text);
        let (body, closing_repaired) = ensure_closing(&body, name);
        if closing_repaired {
            warn!("Model email did not end with the expected closing line; repaired");
        }
        Self {
            subject,
            body,
            closing_repaired,
        }
    }
}

/// Returns `(subject, body)`. Every `subject:` line is dropped from the body.
pub fn split_subject_body(email_text: &str) -> (String, String) {
    let subject = email_text
        .lines()
        .find_map(subject_remainder)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SUBJECT)
        .to_string();

    let body = email_text
        .lines()
        .filter(|line| subject_remainder(line).is_none())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    (subject, body)
}

fn subject_remainder(line: &str) -> Option<&str> {
    let line = line.trim_start();
    let prefix = line.get(..SUBJECT_PREFIX.len())?;
    prefix
        .eq_ignore_ascii_case(SUBJECT_PREFIX)
        .then(|| &line[SUBJECT_PREFIX.len()..])
}

/// Makes `body` end with exactly `Sincerely, {name}`.
///
/// - already there (modulo case/spacing): normalized in place
/// - `<valediction>,` + `{name}` on two lines: merged into the closing
/// - anything else: closing appended after a blank line
pub fn ensure_closing(body: &str, name: &str) -> (String, bool) {
    let closing = format!("{CLOSING_WORD} {}", name.trim());
    let mut lines: Vec<&str> = body.trim_end().lines().collect();

    let mut non_empty = lines
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, _)| i);
    let last = non_empty.next();
    let before_last = non_empty.next();

    let Some(last) = last else {
        return (closing, true);
    };

    if normalize(lines[last]) == normalize(&closing) {
        let repaired = lines[last] != closing;
        lines[last] = &closing;
        return (lines.join("\n"), repaired);
    }

    if let Some(prev) = before_last {
        let valediction = lines[prev].trim();
        if normalize(lines[last]) == normalize(name)
            && valediction.ends_with(',')
            && valediction.len() <= MAX_VALEDICTION_LEN
        {
            lines.truncate(prev);
            lines.push(&closing);
            return (lines.join("\n"), true);
        }
    }

    (format!("{}\n\n{closing}", lines.join("\n")), true)
}

fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        let (subject, body) =
            split_subject_body("Subject: Great Fit\nI would love to join.\nSincerely, Alice");
        assert_eq!(subject, "Great Fit");
        assert_eq!(body, "I would love to join.\nSincerely, Alice");
        assert!(!body.contains("Subject"));
    }

    #[test]
    fn test_split_case_insensitive_and_indented() {
        let (subject, body) = split_subject_body("  SUBJECT:   Backend role  \n\nHello team");
        assert_eq!(subject, "Backend role");
        assert_eq!(body, "Hello team");
    }

    #[test]
    fn test_subject_from_first_matching_line_only() {
        let text = "Here is your email:\nSubject: First\nsubject: Second\nBody";
        let (subject, body) = split_subject_body(text);
        assert_eq!(subject, "First");
        assert_eq!(body, "Here is your email:\nBody");
    }

    #[test]
    fn test_missing_subject_uses_placeholder() {
        let (subject, body) = split_subject_body("Hello team,\nI am keen.");
        assert_eq!(subject, DEFAULT_SUBJECT);
        assert_eq!(body, "Hello team,\nI am keen.");
    }

    #[test]
    fn test_blank_subject_uses_placeholder() {
        let (subject, _) = split_subject_body("Subject:   \nBody");
        assert_eq!(subject, DEFAULT_SUBJECT);
    }

    #[test]
    fn test_word_subjects_is_not_a_subject_line() {
        let (subject, body) = split_subject_body("Subjects I studied: maths\nBody");
        assert_eq!(subject, DEFAULT_SUBJECT);
        assert!(body.starts_with("Subjects I studied"));
    }

    #[test]
    fn test_closing_kept_when_present() {
        let (body, repaired) = ensure_closing("I would love to join.\nSincerely, Alice", "Alice");
        assert_eq!(body, "I would love to join.\nSincerely, Alice");
        assert!(!repaired);
    }

    #[test]
    fn test_closing_normalized_case() {
        let (body, repaired) = ensure_closing("Thanks.\nsincerely,  alice", "Alice");
        assert_eq!(body, "Thanks.\nSincerely, Alice");
        assert!(repaired);
    }

    #[test]
    fn test_closing_split_over_two_lines_merged() {
        let (body, repaired) = ensure_closing("Thanks.\n\nSincerely,\nAlice", "Alice");
        assert_eq!(body, "Thanks.\n\nSincerely, Alice");
        assert!(repaired);
    }

    #[test]
    fn test_other_valediction_replaced() {
        let (body, repaired) = ensure_closing("Thanks.\nBest regards,\nAlice", "Alice");
        assert_eq!(body, "Thanks.\nSincerely, Alice");
        assert!(repaired);
    }

    #[test]
    fn test_missing_closing_appended() {
        let (body, repaired) = ensure_closing("I would love to join.", "Alice");
        assert_eq!(body, "I would love to join.\n\nSincerely, Alice");
        assert!(repaired);
    }

    #[test]
    fn test_empty_body_gets_closing() {
        let (body, repaired) = ensure_closing("", "Alice");
        assert_eq!(body, "Sincerely, Alice");
        assert!(repaired);
    }

    #[test]
    fn test_from_model_output() {
        let draft = EmailDraft::from_model_output(
            "Subject: Great Fit\n\nI would love to join.\nSincerely, Alice",
            "Alice",
        );
        assert_eq!(draft.subject, "Great Fit");
        assert!(draft.body.ends_with("Sincerely, Alice"));
        assert!(!draft.closing_repaired);
    }
}
