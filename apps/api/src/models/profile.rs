use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The single stored user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: i64,
    pub name: String,
    pub qualification: String,
    pub experience: String,
    /// Free-form, comma-separated.
    pub skills: String,
    /// May be empty — only known when the profile came from a résumé.
    pub email: String,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields as submitted by the user. Replaces the stored profile wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileInput {
    pub name: String,
    pub qualification: String,
    pub experience: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub email: String,
}
