use tracing::info;

use crate::chain::jobs::JobListing;
use crate::chain::prompts::WRITE_MAIL_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::prompts::render;
use crate::llm_client::CompletionService;

/// Drafts a cold email for `job` on behalf of the candidate.
///
/// Returns the model's text untouched. The prompt asks for a `Subject:` first line
/// and a `Sincerely, {name}` last line; splitting and checking that structure is the
/// caller's job (see `outreach::draft`).
pub async fn write_mail(
    llm: &dyn CompletionService,
    job: &JobListing,
    name: &str,
    qualification: &str,
    experience: &str,
    skills: &str,
) -> Result<String, AppError> {
    let job_description = job.describe();
    let prompt = render(
        WRITE_MAIL_PROMPT_TEMPLATE,
        &[
            ("name", name),
            ("qualification", qualification),
            ("experience", experience),
            ("skills", skills),
            ("job_description", &job_description),
        ],
    );

    let email = llm.complete(&prompt).await?;
    info!("Drafted email for role '{}' ({} chars)", job.role, email.len());
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedCompletion;

    fn job() -> JobListing {
        JobListing {
            role: "Data Engineer".into(),
            experience: "1-2 years".into(),
            skills: "Python, Airflow".into(),
            responsibilities: "Build pipelines".into(),
            qualifications: "B.Tech".into(),
        }
    }

    #[tokio::test]
    async fn test_returns_raw_model_text() {
        let reply = "Subject: Great Fit\n\nI would love to join.\nSincerely, Alice";
        let llm = ScriptedCompletion::new([reply]);
        let email = write_mail(&llm, &job(), "Alice", "B.Tech", "1 yr", "Python")
            .await
            .unwrap();
        assert_eq!(email, reply);
    }

    #[tokio::test]
    async fn test_prompt_fixes_structure_and_candidate() {
        let llm = ScriptedCompletion::new(["Subject: x"]);
        write_mail(&llm, &job(), "Alice", "B.Tech", "1 yr", "Python")
            .await
            .unwrap();
        let prompt = &llm.prompts()[0];
        assert!(prompt.contains("Role: Data Engineer"));
        assert!(prompt.contains("Name: Alice"));
        assert!(prompt.contains("Skills: Python\n"));
        assert!(prompt.contains("Subject: <subject line>"));
        assert!(prompt.contains("Sincerely, Alice"));
        assert!(!prompt.contains("{name}"));
    }

    #[tokio::test]
    async fn test_service_failure_propagates() {
        let llm = ScriptedCompletion::failing(401, "Invalid API Key");
        let err = write_mail(&llm, &job(), "Alice", "B.Tech", "1 yr", "Python")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Service(msg) if msg.contains("Invalid API Key")));
    }
}
