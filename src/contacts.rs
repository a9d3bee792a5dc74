//! Contact creation.
//!
//! Contacts are insert-only: nothing in the system updates or deletes a
//! contact once it exists.

use anyhow::Result;
use sqlx::SqlitePool;

/// Fields accepted when creating a contact. Only `name` is required.
#[derive(Debug, Clone, Default)]
pub struct NewContact {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// Inserts a contact and returns its new id.
///
/// `created_at` is stamped by the storage engine default.
pub async fn create_contact(pool: &SqlitePool, contact: &NewContact) -> Result<i64> {
    let result = sqlx::query("INSERT INTO contacts (name, email, phone, notes) VALUES (?, ?, ?, ?)")
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.notes)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}
