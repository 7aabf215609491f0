//! Job extraction — turns cleaned page text into structured job postings.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::chain::lenient_string;
use crate::chain::prompts::JOB_EXTRACT_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::prompts::{render, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{parse_json_value, CompletionService};

pub const JOBS_PARSE_ERROR: &str = "Unable to parse jobs. The model may have returned bad JSON.";

/// A single job posting as reported by the model. Every field is always present;
/// anything the model left out is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub experience: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub skills: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub responsibilities: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub qualifications: String,
}

impl JobListing {
    /// Plain-text rendering used as the job description in the email prompt.
    pub fn describe(&self) -> String {
        [
            ("Role", &self.role),
            ("Experience", &self.experience),
            ("Skills", &self.skills),
            ("Responsibilities", &self.responsibilities),
            ("Qualifications", &self.qualifications),
        ]
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
    }
}

/// Asks the model for every job posting in `page_text`.
///
/// A single JSON object is wrapped into a one-element vector. Output that is not
/// JSON, or JSON of the wrong shape, is an `AppError::Parse` — never an empty list.
pub async fn extract_jobs(
    llm: &dyn CompletionService,
    page_text: &str,
) -> Result<Vec<JobListing>, AppError> {
    let prompt = render(
        JOB_EXTRACT_PROMPT_TEMPLATE,
        &[("json_only", JSON_ONLY_INSTRUCTION), ("page_data", page_text)],
    );
    let raw = llm.complete(&prompt).await?;
    debug!("Raw job extraction output: {raw}");

    let jobs = parse_job_listings(&raw)?;
    info!("Model reported {} job posting(s)", jobs.len());
    Ok(jobs)
}

pub fn parse_job_listings(raw: &str) -> Result<Vec<JobListing>, AppError> {
    let value = parse_json_value(raw).map_err(|e| {
        warn!("Job extraction output is not JSON: {e}");
        parse_error()
    })?;

    let items = match value {
        Value::Array(items) => items,
        // Some models wrap the list: {"jobs": [...]}
        Value::Object(mut map) => match map.remove("jobs") {
            Some(Value::Array(items)) if !map.contains_key("role") => items,
            Some(other) => {
                map.insert("jobs".to_string(), other);
                vec![Value::Object(map)]
            }
            None => vec![Value::Object(map)],
        },
        other => {
            warn!("Job extraction output has unexpected JSON shape: {other}");
            return Err(parse_error());
        }
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(_) => serde_json::from_value(item).map_err(|_| parse_error()),
            _ => Err(parse_error()),
        })
        .collect()
}

fn parse_error() -> AppError {
    AppError::Parse(JOBS_PARSE_ERROR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedCompletion;

    const ENGINEER_JSON: &str = r#"{"role":"Engineer","experience":"2 yrs","skills":"Go","responsibilities":"build","qualifications":"BS"}"#;

    #[tokio::test]
    async fn test_single_object_becomes_one_element_vec() {
        let llm = ScriptedCompletion::new([ENGINEER_JSON]);
        let jobs = extract_jobs(&llm, "Engineer wanted").await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].role, "Engineer");
        assert_eq!(jobs[0].experience, "2 yrs");
        assert_eq!(jobs[0].qualifications, "BS");
    }

    #[tokio::test]
    async fn test_prompt_carries_page_text() {
        let llm = ScriptedCompletion::new([ENGINEER_JSON]);
        extract_jobs(&llm, "We are hiring a Rust developer in Oslo")
            .await
            .unwrap();
        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("We are hiring a Rust developer in Oslo"));
        assert!(prompts[0].contains(JSON_ONLY_INSTRUCTION));
        assert!(!prompts[0].contains("{page_data}"));
    }

    #[tokio::test]
    async fn test_not_json_is_parse_error() {
        let llm = ScriptedCompletion::new(["not json"]);
        let err = extract_jobs(&llm, "page").await.unwrap_err();
        match err {
            AppError::Parse(msg) => assert_eq!(msg, JOBS_PARSE_ERROR),
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_service_failure_is_service_error() {
        let llm = ScriptedCompletion::failing(503, "over capacity");
        let err = extract_jobs(&llm, "page").await.unwrap_err();
        assert!(matches!(err, AppError::Service(_)));
    }

    #[test]
    fn test_array_returns_all_jobs() {
        let raw = r#"[{"role":"Backend"},{"role":"Frontend","skills":["React","CSS"]}]"#;
        let jobs = parse_job_listings(raw).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[1].role, "Frontend");
        assert_eq!(jobs[1].skills, "React, CSS");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let jobs = parse_job_listings(r#"{"role":"Analyst","experience":null}"#).unwrap();
        assert_eq!(jobs[0].role, "Analyst");
        assert_eq!(jobs[0].experience, "");
        assert_eq!(jobs[0].responsibilities, "");
    }

    #[test]
    fn test_fenced_output_accepted() {
        let raw = format!("```json\n{ENGINEER_JSON}\n```");
        assert_eq!(parse_job_listings(&raw).unwrap()[0].role, "Engineer");
    }

    #[test]
    fn test_wrapped_jobs_key_unwrapped() {
        let jobs = parse_job_listings(r#"{"jobs":[{"role":"A"},{"role":"B"}]}"#).unwrap();
        assert_eq!(jobs.len(), 2);
    }

    #[test]
    fn test_wrong_shapes_are_parse_errors() {
        for raw in [r#""just a string""#, "42", "[1, 2]", r#"[{"role":"A"}, "B"]"#] {
            assert!(
                matches!(parse_job_listings(raw), Err(AppError::Parse(_))),
                "expected parse error for {raw}"
            );
        }
    }

    #[test]
    fn test_empty_array_is_empty_not_error() {
        assert!(parse_job_listings("[]").unwrap().is_empty());
    }

    #[test]
    fn test_describe_skips_empty_fields() {
        let job = JobListing {
            role: "Engineer".into(),
            skills: "Go".into(),
            ..Default::default()
        };
        assert_eq!(job.describe(), "Role: Engineer\nSkills: Go");
    }
}
