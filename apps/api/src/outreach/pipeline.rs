//! Outreach pipeline — cleaned page text + stored profile → ready-to-send draft.
//!
//! Flow: extract_email ∥ extract_jobs → pick job → write_mail → split subject/body →
//!       enforce closing line → build send links.
//!
//! Fetching the page and persisting the result are the handler's concern; this module
//! is pure orchestration over `CompletionService` so it can be driven by a fake.

use serde::Serialize;
use tracing::info;

use crate::chain::{extract_jobs, write_mail, JobListing};
use crate::errors::AppError;
use crate::llm_client::CompletionService;
use crate::models::profile::ProfileRow;
use crate::outreach::draft::EmailDraft;
use crate::outreach::links::{gmail_compose_url, mailto_url};
use crate::text::extract_email;

#[derive(Debug, Clone, Serialize)]
pub struct OutreachDraft {
    pub job: JobListing,
    pub jobs_found: usize,
    pub recipient_email: Option<String>,
    pub subject: String,
    pub body: String,
    pub closing_repaired: bool,
    /// The model's reply before splitting, as stored in history.
    pub email_text: String,
    pub mailto_url: String,
    pub gmail_url: String,
}

/// Drafts an email for the `job_index`-th posting found in `cleaned_text`.
pub async fn draft_for_page(
    llm: &dyn CompletionService,
    profile: &ProfileRow,
    cleaned_text: &str,
    job_index: usize,
) -> Result<OutreachDraft, AppError> {
    let recipient_email = extract_email(cleaned_text);
    match &recipient_email {
        Some(address) => info!("Found contact address on page: {address}"),
        None => info!("No contact address found on page"),
    }

    let mut jobs = extract_jobs(llm, cleaned_text).await?;
    let jobs_found = jobs.len();
    if jobs_found == 0 {
        return Err(AppError::NotFound("No job found on the page.".to_string()));
    }
    if job_index >= jobs_found {
        return Err(AppError::Validation(format!(
            "job_index {job_index} is out of range: the page has {jobs_found} job(s)"
        )));
    }
    let job = jobs.swap_remove(job_index);

    let email_text = write_mail(
        llm,
        &job,
        &profile.name,
        &profile.qualification,
        &profile.experience,
        &profile.skills,
    )
    .await?;

    let draft = EmailDraft::from_model_output(&email_text, &profile.name);
    let recipient = recipient_email.as_deref();

    Ok(OutreachDraft {
        mailto_url: mailto_url(recipient, &draft.subject, &draft.body),
        gmail_url: gmail_compose_url(recipient, &draft.subject, &draft.body),
        job,
        jobs_found,
        recipient_email,
        subject: draft.subject,
        body: draft.body,
        closing_repaired: draft.closing_repaired,
        email_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedCompletion;
    use crate::text::clean;
    use chrono::Utc;

    fn alice() -> ProfileRow {
        ProfileRow {
            id: 1,
            name: "Alice".into(),
            qualification: "B.Tech".into(),
            experience: "1 yr".into(),
            skills: "Python".into(),
            email: String::new(),
            updated_at: Utc::now(),
        }
    }

    const PAGE: &str = "<h1>Data Engineer</h1>\n<p>2 yrs   Python.</p> Apply: jobs@acme.com";
    const JOB_JSON: &str = r#"{"role":"Data Engineer","experience":"2 yrs","skills":"Python","responsibilities":"pipelines","qualifications":"BS"}"#;

    #[tokio::test]
    async fn test_end_to_end_draft() {
        let llm = ScriptedCompletion::new([
            JOB_JSON,
            "Subject: Data Engineer at Acme\n\nI build reliable pipelines in Python.\nSincerely, Alice",
        ]);
        let cleaned = clean(PAGE);
        let out = draft_for_page(&llm, &alice(), &cleaned, 0).await.unwrap();

        assert_eq!(out.job.role, "Data Engineer");
        assert_eq!(out.jobs_found, 1);
        assert_eq!(out.recipient_email.as_deref(), Some("jobs@acme.com"));
        assert_eq!(out.subject, "Data Engineer at Acme");
        assert!(!out.subject.is_empty());
        assert!(out.body.ends_with("Sincerely, Alice"));
        assert!(!out.closing_repaired);
        assert!(out.mailto_url.starts_with("mailto:jobs%40acme.com?subject=Data%20Engineer"));
        assert!(out.gmail_url.contains("to=jobs%40acme.com"));

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("Data Engineer 2 yrs Python."));
        assert!(prompts[1].contains("Role: Data Engineer"));
        assert!(prompts[1].contains("Name: Alice"));
    }

    #[tokio::test]
    async fn test_drifting_model_gets_closing_repaired() {
        let llm = ScriptedCompletion::new([JOB_JSON, "I would love to join your team."]);
        let out = draft_for_page(&llm, &alice(), "Data Engineer", 0).await.unwrap();
        assert_eq!(out.subject, "Cold Email");
        assert!(out.body.ends_with("Sincerely, Alice"));
        assert!(out.closing_repaired);
    }

    #[tokio::test]
    async fn test_selects_requested_job() {
        let llm = ScriptedCompletion::new([
            r#"[{"role":"Backend"},{"role":"Frontend"}]"#,
            "Subject: Frontend\nHi\nSincerely, Alice",
        ]);
        let out = draft_for_page(&llm, &alice(), "jobs", 1).await.unwrap();
        assert_eq!(out.job.role, "Frontend");
        assert_eq!(out.jobs_found, 2);
    }

    #[tokio::test]
    async fn test_job_index_out_of_range() {
        let llm = ScriptedCompletion::new([JOB_JSON]);
        let err = draft_for_page(&llm, &alice(), "jobs", 3).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        // No email is drafted once selection fails.
        assert_eq!(llm.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_no_jobs_is_not_found() {
        let llm = ScriptedCompletion::new(["[]"]);
        let err = draft_for_page(&llm, &alice(), "empty page", 0).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_bad_json_stops_before_drafting() {
        let llm = ScriptedCompletion::new(["not json"]);
        let err = draft_for_page(&llm, &alice(), "page", 0).await.unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
        assert_eq!(llm.prompts().len(), 1);
    }
}
