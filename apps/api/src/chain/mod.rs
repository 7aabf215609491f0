//! Extraction & drafting chain — prompt template + LLM call + response parse.
//!
//! Three operations, each a single completion at temperature 0:
//! - `extract_jobs`: page text → `Vec<JobListing>` (JSON, fails with `AppError::Parse`)
//! - `extract_resume_fields`: résumé text → `ResumeFields` (JSON, same contract)
//! - `write_mail`: job + candidate → raw email text (no parse step)
//!
//! All LLM calls go through `CompletionService` — nothing here talks HTTP.

pub mod jobs;
pub mod mail;
pub mod prompts;
pub mod resume_fields;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub use jobs::{extract_jobs, JobListing};
pub use mail::write_mail;
pub use resume_fields::{extract_resume_fields, ResumeFields};

/// Accepts whatever the model put in a text field and renders it as a string.
///
/// Lists are joined with ", ", scalars are stringified, `null` becomes "".
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(flatten_value(&value))
}

fn flatten_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(flatten_value)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}
