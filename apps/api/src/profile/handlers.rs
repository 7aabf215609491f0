use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::chain::{extract_resume_fields, ResumeFields};
use crate::errors::AppError;
use crate::models::profile::{ProfileInput, ProfileRow};
use crate::outreach::handlers::NO_PROFILE;
use crate::profile::validation::validate_profile;
use crate::sources::extract_pdf_text;
use crate::state::AppState;
use crate::store::{clear_all, get_profile, save_profile};
use crate::text::clean;

/// Multipart field carrying the résumé PDF.
const RESUME_FIELD: &str = "file";

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
) -> Result<Json<ProfileRow>, AppError> {
    let profile = get_profile(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(NO_PROFILE.to_string()))?;
    Ok(Json(profile))
}

/// PUT /api/v1/profile
///
/// Replaces the stored profile wholesale — no merge with the previous one.
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Json(input): Json<ProfileInput>,
) -> Result<Json<ProfileRow>, AppError> {
    let input = validate_profile(input)?;
    let profile = save_profile(&state.db, &input).await?;
    Ok(Json(profile))
}

/// DELETE /api/v1/profile
///
/// "Log out": forgets the profile and every generated email.
pub async fn handle_delete_profile(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    clear_all(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/profile/resume
///
/// Reads an uploaded résumé PDF and returns the profile fields found in it.
/// The result only prefills the profile form; it is not stored.
pub async fn handle_resume_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeFields>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart upload: {e}")))?
    {
        if field.name() == Some(RESUME_FIELD) {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            upload = Some(data);
            break;
        }
    }

    let data = upload.ok_or_else(|| {
        AppError::Validation(format!("Upload a PDF résumé in the '{RESUME_FIELD}' field"))
    })?;
    info!("Received résumé upload ({} bytes)", data.len());

    let text = extract_pdf_text(data).await?;
    let fields = extract_resume_fields(state.llm.as_ref(), &clean(&text)).await?;
    Ok(Json(fields))
}
