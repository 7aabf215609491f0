// Shared prompt fragments and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting pieces.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static RE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(\w+)\}").unwrap());

/// Instruction appended to every structured-extraction prompt.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Return ONLY valid JSON. \
    Do NOT include any text outside the JSON. \
    Do NOT use markdown code fences. \
    Do NOT write explanations or commentary.";

/// Substitutes `{key}` placeholders in a prompt template.
///
/// The template is scanned once, so values are inserted verbatim: a `{key}` inside a
/// value is never expanded. Placeholders without a matching key are left as-is.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    RE_PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            vars.iter()
                .find(|(name, _)| *name == key)
                .map_or_else(|| caps[0].to_string(), |(_, value)| value.to_string())
        })
        .into_owned()
}
