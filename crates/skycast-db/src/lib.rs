//! Search history persistence
//!
//! PostgreSQL through a sqlx pool for deployments, plus an in-process
//! store for local runs and tests. Both implement
//! [`skycast_core::HistoryStore`].

pub mod client;
pub mod memory;
pub mod queries;
pub mod schema;
pub mod store;

pub use client::*;
pub use memory::MemoryHistoryStore;
pub use schema::*;
pub use store::PgHistoryStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

pub type DbResult<T> = Result<T, DbError>;

impl From<DbError> for skycast_core::PersistenceError {
    fn from(err: DbError) -> Self {
        skycast_core::PersistenceError::new(err)
    }
}
