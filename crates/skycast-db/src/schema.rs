//! Table layout for the search history log

use chrono::{DateTime, Utc};
use skycast_core::HistoryEntry;
use sqlx::FromRow;

/// Row of `search_history`
#[derive(Debug, Clone, FromRow)]
pub struct SearchRow {
    pub id: i64,
    pub city: String,
    pub search_time: DateTime<Utc>,
}

impl From<SearchRow> for HistoryEntry {
    fn from(row: SearchRow) -> Self {
        HistoryEntry {
            id: row.id,
            city: row.city,
            searched_at: row.search_time,
        }
    }
}

/// Idempotent; safe to run on every startup.
pub const CREATE_SEARCH_HISTORY: &str = r#"
    CREATE TABLE IF NOT EXISTS search_history (
        id BIGSERIAL PRIMARY KEY,
        city TEXT NOT NULL,
        search_time TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;
