//! Axum route handlers for job extraction and email generation.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chain::{extract_jobs, JobListing};
use crate::errors::AppError;
use crate::models::email::{EmailHistoryRow, NewEmail};
use crate::outreach::pipeline::{draft_for_page, OutreachDraft};
use crate::state::AppState;
use crate::store::{append_email, get_profile, list_history, PROFILE_ID};
use crate::text::{clean, extract_email};

pub const INVALID_URL: &str = "Please enter a valid URL.";
pub const NO_PROFILE: &str = "No user data found. Please fill out your profile.";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractJobsRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractJobsResponse {
    pub jobs: Vec<JobListing>,
    pub recipient_email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateEmailRequest {
    pub url: String,
    /// Which of the page's postings to write for. Defaults to the first.
    #[serde(default)]
    pub job_index: usize,
}

#[derive(Debug, Serialize)]
pub struct GenerateEmailResponse {
    pub history_id: i64,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub draft: OutreachDraft,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/extract
///
/// Fetches a listing page and returns every posting the model finds, plus the
/// contact address on the page. Nothing is stored.
pub async fn handle_extract_jobs(
    State(state): State<AppState>,
    Json(request): Json<ExtractJobsRequest>,
) -> Result<Json<ExtractJobsResponse>, AppError> {
    let url = validate_url(&request.url)?;

    let raw = state.fetcher.fetch_text(url).await?;
    let cleaned = clean(&raw);
    let recipient_email = extract_email(&cleaned);
    let jobs = extract_jobs(state.llm.as_ref(), &cleaned).await?;

    Ok(Json(ExtractJobsResponse {
        jobs,
        recipient_email,
    }))
}

/// POST /api/v1/emails/generate
///
/// Full flow: validate → load profile → fetch page → clean → draft → append to history.
/// Input checks run before any outbound call.
pub async fn handle_generate_email(
    State(state): State<AppState>,
    Json(request): Json<GenerateEmailRequest>,
) -> Result<Json<GenerateEmailResponse>, AppError> {
    let url = validate_url(&request.url)?;
    let profile = get_profile(&state.db)
        .await?
        .ok_or_else(|| AppError::Validation(NO_PROFILE.to_string()))?;

    let raw = state.fetcher.fetch_text(url).await?;
    let cleaned = clean(&raw);

    let draft = draft_for_page(state.llm.as_ref(), &profile, &cleaned, request.job_index).await?;

    let row = append_email(
        &state.db,
        profile.id,
        &NewEmail {
            job_role: &draft.job.role,
            subject: &draft.subject,
            body: &draft.body,
            email_text: &draft.email_text,
            recipient_email: draft.recipient_email.as_deref(),
        },
    )
    .await?;
    info!("Stored email #{} for role '{}'", row.id, row.job_role);

    Ok(Json(GenerateEmailResponse {
        history_id: row.id,
        created_at: row.created_at,
        draft,
    }))
}

/// GET /api/v1/emails/history
pub async fn handle_email_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmailHistoryRow>>, AppError> {
    let history = list_history(&state.db, PROFILE_ID).await?;
    Ok(Json(history))
}

fn validate_url(url: &str) -> Result<&str, AppError> {
    let url = url.trim();
    if url.starts_with("http") {
        Ok(url)
    } else {
        Err(AppError::Validation(INVALID_URL.to_string()))
    }
}
