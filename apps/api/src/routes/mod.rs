pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::outreach::handlers as outreach;
use crate::profile::handlers as profile;
use crate::state::AppState;

/// Résumé PDFs routinely exceed axum's 2 MB default.
const RESUME_UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile)
                .put(profile::handle_put_profile)
                .delete(profile::handle_delete_profile),
        )
        .route(
            "/api/v1/profile/resume",
            post(profile::handle_resume_upload)
                .layer(DefaultBodyLimit::max(RESUME_UPLOAD_LIMIT_BYTES)),
        )
        // Jobs & emails
        .route("/api/v1/jobs/extract", post(outreach::handle_extract_jobs))
        .route(
            "/api/v1/emails/generate",
            post(outreach::handle_generate_email),
        )
        .route(
            "/api/v1/emails/history",
            get(outreach::handle_email_history),
        )
        .with_state(state)
}
