use std::sync::Arc;

use sqlx::SqlitePool;

use crate::llm_client::CompletionService;
use crate::sources::PageFetcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Completion backend. Default: `LlmClient`; tests inject a scripted fake.
    pub llm: Arc<dyn CompletionService>,
    /// Job page source. Default: `HttpPageFetcher`.
    pub fetcher: Arc<dyn PageFetcher>,
}
