//! Interaction logging.

use anyhow::{bail, Result};
use sqlx::{Row, SqlitePool};

use crate::clock;

/// Fields accepted when logging an interaction.
#[derive(Debug, Clone)]
pub struct NewInteraction {
    pub contact_id: i64,
    pub kind: String,
    /// Client-supplied timestamp; defaults to the current server time.
    pub timestamp: Option<String>,
    pub content: String,
    pub source: Option<String>,
}

/// Inserts an interaction and returns its new id.
pub async fn create_interaction(pool: &SqlitePool, interaction: &NewInteraction) -> Result<i64> {
    let timestamp = interaction
        .timestamp
        .clone()
        .unwrap_or_else(clock::now_iso);

    let result = sqlx::query(
        "INSERT INTO interactions (contact_id, type, timestamp, content, source) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(interaction.contact_id)
    .bind(&interaction.kind)
    .bind(&timestamp)
    .bind(&interaction.content)
    .bind(&interaction.source)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Fetches the content of an interaction, failing with "not found" if the
/// id is unknown.
pub async fn interaction_content(pool: &SqlitePool, interaction_id: i64) -> Result<String> {
    let row = sqlx::query("SELECT content FROM interactions WHERE id = ?")
        .bind(interaction_id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(row.get("content")),
        None => bail!("interaction not found: {}", interaction_id),
    }
}
