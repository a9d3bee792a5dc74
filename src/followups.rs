//! Followup scheduling and the due-scan.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::Followup;

/// Fields accepted when scheduling a followup. All are required; status
/// always starts as `pending`.
#[derive(Debug, Clone)]
pub struct NewFollowup {
    pub contact_id: i64,
    pub kind: String,
    pub scheduled_time: String,
    pub message: String,
}

/// Inserts a followup and returns its new id.
pub async fn create_followup(pool: &SqlitePool, followup: &NewFollowup) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO followups (contact_id, type, scheduled_time, message) VALUES (?, ?, ?, ?)",
    )
    .bind(followup.contact_id)
    .bind(&followup.kind)
    .bind(&followup.scheduled_time)
    .bind(&followup.message)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Claims every followup due at `now`: flips status from `pending` to
/// `sent` and returns the claimed rows.
///
/// The flip and the read are a single UPDATE .. RETURNING statement, so
/// two calls — sequential or concurrent — can never claim the same row.
/// "sent" records only that the row was surfaced to a caller, not that
/// anything was delivered.
pub async fn claim_due(pool: &SqlitePool, now: &str) -> Result<Vec<Followup>> {
    let claimed: Vec<Followup> = sqlx::query_as(
        r#"
        UPDATE followups
        SET status = 'sent'
        WHERE status = 'pending' AND scheduled_time <= ?
        RETURNING id, contact_id, type, scheduled_time, status, message, created_at
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(claimed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::{create_contact, NewContact};
    use crate::models::{STATUS_PENDING, STATUS_SENT};
    use crate::testutil::test_pool;

    async fn seed_contact(pool: &SqlitePool) -> i64 {
        create_contact(
            pool,
            &NewContact {
                name: "Ada".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap()
    }

    async fn seed_followup(pool: &SqlitePool, contact_id: i64, scheduled_time: &str) -> i64 {
        create_followup(
            pool,
            &NewFollowup {
                contact_id,
                kind: "email".to_string(),
                scheduled_time: scheduled_time.to_string(),
                message: "check in".to_string(),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn new_followups_start_pending() {
        let (_tmp, pool) = test_pool().await;
        let contact_id = seed_contact(&pool).await;
        let id = seed_followup(&pool, contact_id, "2026-01-01T00:00:00").await;

        let status: String = sqlx::query_scalar("SELECT status FROM followups WHERE id = ?")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(status, STATUS_PENDING);
    }

    #[tokio::test]
    async fn claims_exactly_the_due_pending_set() {
        let (_tmp, pool) = test_pool().await;
        let contact_id = seed_contact(&pool).await;

        let due = seed_followup(&pool, contact_id, "2026-01-01T00:00:00").await;
        let boundary = seed_followup(&pool, contact_id, "2026-06-01T12:00:00").await;
        let future = seed_followup(&pool, contact_id, "2027-01-01T00:00:00").await;

        let claimed = claim_due(&pool, "2026-06-01T12:00:00").await.unwrap();
        let mut ids: Vec<i64> = claimed.iter().map(|f| f.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![due, boundary]);
        assert!(claimed.iter().all(|f| f.status == STATUS_SENT));

        let status: String = sqlx::query_scalar("SELECT status FROM followups WHERE id = ?")
            .bind(future)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(status, STATUS_PENDING);
    }

    #[tokio::test]
    async fn second_scan_returns_nothing() {
        let (_tmp, pool) = test_pool().await;
        let contact_id = seed_contact(&pool).await;
        seed_followup(&pool, contact_id, "2026-01-01T00:00:00").await;

        let first = claim_due(&pool, "2026-02-01T00:00:00").await.unwrap();
        assert_eq!(first.len(), 1);

        let second = claim_due(&pool, "2026-02-01T00:00:00").await.unwrap();
        assert!(second.is_empty());
    }

    #[tokio::test]
    async fn claimed_rows_carry_full_records() {
        let (_tmp, pool) = test_pool().await;
        let contact_id = seed_contact(&pool).await;
        let id = seed_followup(&pool, contact_id, "2026-01-01T00:00:00").await;

        let claimed = claim_due(&pool, "2026-02-01T00:00:00").await.unwrap();
        assert_eq!(claimed.len(), 1);
        let f = &claimed[0];
        assert_eq!(f.id, id);
        assert_eq!(f.contact_id, contact_id);
        assert_eq!(f.kind, "email");
        assert_eq!(f.scheduled_time, "2026-01-01T00:00:00");
        assert_eq!(f.message, "check in");
        assert!(!f.created_at.is_empty());
    }
}
