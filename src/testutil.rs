//! Shared helpers for unit tests: a migrated pool over a temp-file database.

use sqlx::SqlitePool;
use tempfile::TempDir;

use crate::config::{Config, DbConfig, ServerConfig};
use crate::{db, migrate};

pub fn test_config(dir: &TempDir) -> Config {
    Config {
        db: DbConfig {
            path: dir.path().join("crm.db"),
            max_connections: 5,
            busy_timeout_secs: 5,
        },
        server: ServerConfig {
            bind: "127.0.0.1:0".to_string(),
        },
    }
}

/// Opens a pool over a fresh temp-file database with the schema applied.
/// The `TempDir` must be kept alive for the duration of the test.
pub async fn test_pool() -> (TempDir, SqlitePool) {
    let tmp = TempDir::new().unwrap();
    let config = test_config(&tmp);
    let pool = db::connect(&config).await.unwrap();
    migrate::run_migrations(&pool).await.unwrap();
    (tmp, pool)
}
