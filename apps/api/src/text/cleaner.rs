//! Text Cleaner — normalizes raw page or PDF text before it is sent to the LLM.
//!
//! `clean` is total and idempotent: the normalization passes are repeated until the
//! output stops changing, so a removal that exposes a new artifact (e.g. `<<b>i>`)
//! is handled in the same call.

use std::sync::LazyLock;

use regex::Regex;

static RE_HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^<>]*>").unwrap());

// The leading group keeps `user@www.example.com` intact: a URL must start the text or
// follow a character that cannot be part of an address.
static RE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(^|[^\w@.%+-])(?:https?://|www\.)[^\s<>"']+"#).unwrap()
});

static RE_BOILERPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:skip to (?:main )?content|skip navigation|toggle navigation|back to top|accept all cookies|cookie settings|sign in to apply|share this job)\b",
    )
    .unwrap()
});

static RE_NBSP_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)&(?:nbsp|#160|#xa0);").unwrap());

/// Normalizes scraped text: strips markup, URLs, control characters and navigation
/// boilerplate, then collapses whitespace to single spaces and trims.
pub fn clean(raw: &str) -> String {
    // After the first pass every productive pass strictly shortens the text, so this
    // terminates.
    let mut current = normalize_once(raw);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_once(text: &str) -> String {
    let text = RE_HTML_TAG.replace_all(text, " ");
    let text = RE_NBSP_ENTITY.replace_all(&text, " ");
    let text = RE_URL.replace_all(&text, "$1 ");
    let text = RE_BOILERPLATE.replace_all(&text, " ");
    let text: String = text
        .chars()
        .filter_map(|c| {
            if c.is_control() {
                Some(' ')
            } else if is_invisible(c) {
                None
            } else {
                Some(c)
            }
        })
        .collect();
    collapse_whitespace(&text)
}

/// Zero-width and formatting characters that render as nothing.
fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}' | '\u{2060}'..='\u{2064}' | '\u{FEFF}' | '\u{00AD}'
    )
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
