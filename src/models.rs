//! Core data models for the CRM store.
//!
//! Row structs for the four entities. Timestamps are stored as ISO-8601
//! text so SQLite's string comparison orders them chronologically.

use serde::Serialize;
use sqlx::FromRow;

/// A person record tracked by the CRM.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

/// A logged touchpoint (call, email, etc.) with a contact.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Interaction {
    pub id: i64,
    pub contact_id: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: String,
    pub content: String,
    pub source: Option<String>,
}

/// A text annotation attached to an interaction, manually supplied or
/// synthesized from the interaction's content.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AiNote {
    pub id: i64,
    pub interaction_id: i64,
    pub note: String,
    pub created_at: String,
}

/// A scheduled reminder tied to a contact. Status moves from `pending`
/// to `sent` exactly once, when the due-scan claims it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Followup {
    pub id: i64,
    pub contact_id: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub scheduled_time: String,
    pub status: String,
    pub message: String,
    pub created_at: String,
}

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_SENT: &str = "sent";
