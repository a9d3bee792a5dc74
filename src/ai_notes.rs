//! AI notes: manual creation and template-based generation.
//!
//! "Generation" is deliberately a fixed-format truncation of the
//! interaction's content, not a learned summary. The 100-character limit
//! and the trailing ellipsis are part of the endpoint's contract.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::interactions;

/// Maximum number of characters of interaction content carried into a
/// generated note.
const SUMMARY_MAX_CHARS: usize = 100;

/// Inserts a manually supplied note and returns its new id.
pub async fn create_note(pool: &SqlitePool, interaction_id: i64, note: &str) -> Result<i64> {
    let result = sqlx::query("INSERT INTO ai_notes (interaction_id, note) VALUES (?, ?)")
        .bind(interaction_id)
        .bind(note)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Synthesizes a note from the interaction's content, inserts it, and
/// returns the new id together with the generated text.
///
/// Fails with "not found" if the interaction does not exist; nothing is
/// written in that case.
pub async fn generate_note(pool: &SqlitePool, interaction_id: i64) -> Result<(i64, String)> {
    let content = interactions::interaction_content(pool, interaction_id).await?;
    let note = summarize(&content);
    let id = create_note(pool, interaction_id, &note).await?;
    Ok((id, note))
}

/// The fixed note template: first 100 characters of content, ellipsis
/// always appended. Truncation counts characters, not bytes.
fn summarize(content: &str) -> String {
    let prefix: String = content.chars().take(SUMMARY_MAX_CHARS).collect();
    format!("Interaction summary: {}...", prefix)
}
