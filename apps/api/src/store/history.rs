use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::email::{EmailHistoryRow, NewEmail};

/// Appends a generated email to the profile's history. Rows are never updated.
pub async fn append_email(
    pool: &SqlitePool,
    profile_id: i64,
    email: &NewEmail<'_>,
) -> Result<EmailHistoryRow, sqlx::Error> {
    sqlx::query_as::<_, EmailHistoryRow>(
        r#"
        INSERT INTO email_history
            (profile_id, job_role, subject, body, email_text, recipient_email, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(profile_id)
    .bind(email.job_role)
    .bind(email.subject)
    .bind(email.body)
    .bind(email.email_text)
    .bind(email.recipient_email)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// Newest first.
pub async fn list_history(
    pool: &SqlitePool,
    profile_id: i64,
) -> Result<Vec<EmailHistoryRow>, sqlx::Error> {
    sqlx::query_as::<_, EmailHistoryRow>(
        "SELECT * FROM email_history WHERE profile_id = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(profile_id)
    .fetch_all(pool)
    .await
}
