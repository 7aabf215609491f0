use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::profile::{ProfileInput, ProfileRow};

/// The profile table holds at most this one row.
pub const PROFILE_ID: i64 = 1;

/// Stores `input` as the active profile, replacing every field of any previous one.
pub async fn save_profile(
    pool: &SqlitePool,
    input: &ProfileInput,
) -> Result<ProfileRow, sqlx::Error> {
    let row = sqlx::query_as::<_, ProfileRow>(
        r#"
        INSERT INTO profile (id, name, qualification, experience, skills, email, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (id) DO UPDATE SET
            name = excluded.name,
            qualification = excluded.qualification,
            experience = excluded.experience,
            skills = excluded.skills,
            email = excluded.email,
            updated_at = excluded.updated_at
        RETURNING *
        "#,
    )
    .bind(PROFILE_ID)
    .bind(&input.name)
    .bind(&input.qualification)
    .bind(&input.experience)
    .bind(&input.skills)
    .bind(&input.email)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    info!("Profile saved for '{}'", row.name);
    Ok(row)
}

pub async fn get_profile(pool: &SqlitePool) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>("SELECT * FROM profile WHERE id = ?")
        .bind(PROFILE_ID)
        .fetch_optional(pool)
        .await
}

/// Forgets everything: the profile and the whole email history.
pub async fn clear_all(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    let emails = sqlx::query("DELETE FROM email_history")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    sqlx::query("DELETE FROM profile").execute(&mut *tx).await?;
    tx.commit().await?;

    info!("Cleared profile and {emails} history row(s)");
    Ok(())
}
