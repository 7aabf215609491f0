use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One generated email. Rows are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmailHistoryRow {
    pub id: i64,
    pub profile_id: i64,
    pub job_role: String,
    pub subject: String,
    pub body: String,
    /// The model's complete reply, before subject/body splitting.
    pub email_text: String,
    pub recipient_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields of a history row supplied by the caller; id and timestamp are assigned on insert.
#[derive(Debug, Clone)]
pub struct NewEmail<'a> {
    pub job_role: &'a str,
    pub subject: &'a str,
    pub body: &'a str,
    pub email_text: &'a str,
    pub recipient_email: Option<&'a str>,
}
