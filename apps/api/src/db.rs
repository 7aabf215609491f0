use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

const MAX_CONNECTIONS: u32 = 5;

/// Single-row profile table: `id` is pinned to 1 so a resubmission is an upsert.
const CREATE_PROFILE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS profile (
    id            INTEGER PRIMARY KEY CHECK (id = 1),
    name          TEXT NOT NULL,
    qualification TEXT NOT NULL,
    experience    TEXT NOT NULL,
    skills        TEXT NOT NULL DEFAULT '',
    email         TEXT NOT NULL DEFAULT '',
    updated_at    TEXT NOT NULL
)"#;

const CREATE_EMAIL_HISTORY_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS email_history (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    profile_id      INTEGER NOT NULL,
    job_role        TEXT NOT NULL,
    subject         TEXT NOT NULL,
    body            TEXT NOT NULL,
    email_text      TEXT NOT NULL,
    recipient_email TEXT,
    created_at      TEXT NOT NULL
)"#;

const CREATE_EMAIL_HISTORY_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_email_history_profile_created
    ON email_history (profile_id, created_at DESC)"#;

/// Opens (creating if needed) the SQLite database and makes sure the schema exists.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Opening SQLite database at {database_url}");

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL '{database_url}'"))?
        .create_if_missing(true);

    // Every connection to `sqlite::memory:` is a separate database; keep exactly one.
    let in_memory = database_url.contains(":memory:");
    let mut pool_options = SqlitePoolOptions::new().max_connections(if in_memory {
        1
    } else {
        MAX_CONNECTIONS
    });
    if in_memory {
        pool_options = pool_options.idle_timeout(None).max_lifetime(None);
    }

    let pool = pool_options
        .connect_with(options)
        .await
        .context("Failed to open SQLite database")?;

    init_schema(&pool).await?;

    info!("SQLite database ready");
    Ok(pool)
}

async fn init_schema(pool: &SqlitePool) -> Result<()> {
    for statement in [
        CREATE_PROFILE_TABLE,
        CREATE_EMAIL_HISTORY_TABLE,
        CREATE_EMAIL_HISTORY_INDEX,
    ] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to initialise database schema")?;
    }
    Ok(())
}
