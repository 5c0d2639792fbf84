//! PostgreSQL-backed [`HistoryStore`]

use async_trait::async_trait;
use skycast_core::{HistoryEntry, HistoryStore, PersistenceResult};
use sqlx::postgres::PgConnectOptions;
use tracing::info;

use crate::{DbClient, DbResult};

#[derive(Clone)]
pub struct PgHistoryStore {
    db: DbClient,
}

impl PgHistoryStore {
    /// Wrap an existing client, creating the table if needed.
    pub async fn new(db: DbClient) -> DbResult<Self> {
        db.ensure_schema().await?;
        Ok(Self { db })
    }

    /// Open a pool and prepare the schema.
    pub async fn connect(opts: PgConnectOptions, max_connections: u32) -> DbResult<Self> {
        let db = DbClient::with_options(opts, max_connections).await?;
        db.ping().await?;
        info!(max_connections, "connected to history database");
        Self::new(db).await
    }
}

#[async_trait]
impl HistoryStore for PgHistoryStore {
    async fn record(&self, city: &str) -> PersistenceResult<()> {
        self.db.insert_search(city).await?;
        Ok(())
    }

    async fn recent(&self, limit: usize) -> PersistenceResult<Vec<HistoryEntry>> {
        let rows = self.db.recent_searches(limit).await?;
        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }
}
