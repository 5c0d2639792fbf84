//! Query operations for the search history table

use crate::schema::{SearchRow, CREATE_SEARCH_HISTORY};
use crate::{DbClient, DbResult};
use tracing::{debug, instrument};

impl DbClient {
    /// Create `search_history` if it does not exist yet
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> DbResult<()> {
        sqlx::query(CREATE_SEARCH_HISTORY)
            .execute(self.pool())
            .await?;

        debug!("search_history table ready");
        Ok(())
    }

    /// Append a search, letting the database assign id and timestamp
    #[instrument(skip(self))]
    pub async fn insert_search(&self, city: &str) -> DbResult<SearchRow> {
        let row = sqlx::query_as::<_, SearchRow>(
            r#"
            INSERT INTO search_history (city)
            VALUES ($1)
            RETURNING id, city, search_time
            "#,
        )
        .bind(city)
        .fetch_one(self.pool())
        .await?;

        debug!("Inserted search {} for {}", row.id, row.city);
        Ok(row)
    }

    /// Most recent searches, newest first
    #[instrument(skip(self))]
    pub async fn recent_searches(&self, limit: usize) -> DbResult<Vec<SearchRow>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, SearchRow>(
            r#"
            SELECT id, city, search_time FROM search_history
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        debug!("Retrieved {} searches (limit {})", rows.len(), limit);
        Ok(rows)
    }

    /// Total number of recorded searches
    #[instrument(skip(self))]
    pub async fn count_searches(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM search_history")
            .fetch_one(self.pool())
            .await?;

        Ok(count)
    }
}
