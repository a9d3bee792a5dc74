//! Server-clock timestamps.

use chrono::Local;

/// Current server time as ISO-8601 local time, e.g. `2026-08-30T14:03:07.912345`.
///
/// Stored timestamps are compared as strings by SQLite, so everything that
/// writes or compares a timestamp goes through this one format.
pub fn now_iso() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
