use std::sync::LazyLock;

use regex::Regex;

static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

/// Returns the first email address found in `text`, if any.
pub fn extract_email(text: &str) -> Option<String> {
    RE_EMAIL.find(text).map(|m| m.as_str().to_string())
}
