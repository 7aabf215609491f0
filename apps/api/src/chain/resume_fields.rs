use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::chain::lenient_string;
use crate::chain::prompts::RESUME_EXTRACT_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::prompts::{render, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{parse_json_value, CompletionService};

pub const RESUME_PARSE_ERROR: &str = "Could not parse resume fields.";

/// Profile fields pulled from a résumé. Used to prefill the profile form; never
/// stored directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeFields {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub qualification: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub experience: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub skills: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
}

/// Asks the model for the profile fields found in `resume_text`.
pub async fn extract_resume_fields(
    llm: &dyn CompletionService,
    resume_text: &str,
) -> Result<ResumeFields, AppError> {
    let prompt = render(
        RESUME_EXTRACT_PROMPT_TEMPLATE,
        &[("json_only", JSON_ONLY_INSTRUCTION), ("resume_text", resume_text)],
    );
    let raw = llm.complete(&prompt).await?;
    debug!("Raw resume extraction output: {raw}");
    parse_resume_fields(&raw)
}

pub fn parse_resume_fields(raw: &str) -> Result<ResumeFields, AppError> {
    match parse_json_value(raw) {
        Ok(value @ Value::Object(_)) => {
            serde_json::from_value(value).map_err(|_| AppError::Parse(RESUME_PARSE_ERROR.into()))
        }
        Ok(other) => {
            warn!("Resume extraction output has unexpected JSON shape: {other}");
            Err(AppError::Parse(RESUME_PARSE_ERROR.into()))
        }
        Err(e) => {
            warn!("Resume extraction output is not JSON: {e}");
            Err(AppError::Parse(RESUME_PARSE_ERROR.into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedCompletion;

    #[tokio::test]
    async fn test_extracts_all_fields() {
        let llm = ScriptedCompletion::new([r#"{
            "name": "Alice Doe",
            "qualification": "B.Tech Computer Science",
            "experience": "1 year",
            "skills": "Python, SQL",
            "email": "alice@example.com"
        }"#]);
        let fields = extract_resume_fields(&llm, "Alice Doe ... B.Tech").await.unwrap();
        assert_eq!(fields.name, "Alice Doe");
        assert_eq!(fields.qualification, "B.Tech Computer Science");
        assert_eq!(fields.skills, "Python, SQL");
        assert_eq!(fields.email, "alice@example.com");
        assert!(llm.prompts()[0].contains("Alice Doe ... B.Tech"));
    }

    #[tokio::test]
    async fn test_not_json_is_parse_error() {
        let llm = ScriptedCompletion::new(["not json"]);
        let err = extract_resume_fields(&llm, "resume").await.unwrap_err();
        match err {
            AppError::Parse(msg) => assert_eq!(msg, RESUME_PARSE_ERROR),
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_omitted_fields_are_empty() {
        let fields = parse_resume_fields(r#"{"name": "Bob"}"#).unwrap();
        assert_eq!(fields.name, "Bob");
        assert_eq!(fields.email, "");
        assert_eq!(fields.experience, "");
    }

    #[test]
    fn test_skill_list_joined() {
        let fields = parse_resume_fields(r#"{"skills": ["Rust", "Tokio"]}"#).unwrap();
        assert_eq!(fields.skills, "Rust, Tokio");
    }

    #[test]
    fn test_array_output_rejected() {
        assert!(matches!(
            parse_resume_fields(r#"[{"name": "Bob"}]"#),
            Err(AppError::Parse(_))
        ));
    }
}
