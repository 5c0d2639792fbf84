use async_trait::async_trait;

use crate::{
    Coordinate, GeocodeError, GeocodeResult, HistoryEntry, PersistenceResult, UpstreamError,
    WeatherObservation,
};

/// Resolves a free-text place name to candidate coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Fails with [`GeocodeError::NotFound`] when the lookup has no candidates.
    async fn resolve(&self, city: &str) -> Result<GeocodeResult, GeocodeError>;
}

/// Fetches current conditions for a coordinate.
#[async_trait]
pub trait ForecastClient: Send + Sync {
    async fn current_weather(&self, coord: Coordinate) -> Result<WeatherObservation, UpstreamError>;
}

/// Append-only log of successful city searches.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append one entry. The store assigns the id and timestamp.
    async fn record(&self, city: &str) -> PersistenceResult<()>;

    /// At most `limit` entries, newest first.
    async fn recent(&self, limit: usize) -> PersistenceResult<Vec<HistoryEntry>>;
}
