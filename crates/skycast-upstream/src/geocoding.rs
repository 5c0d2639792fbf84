//! Forward geocoding against the Open-Meteo search API

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use skycast_core::{Coordinate, GeocodeError, GeocodeResult, Geocoder, UpstreamError};
use tracing::debug;

use crate::{endpoint, get_body};

const SERVICE: &str = "geocoding";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // Omitted entirely when nothing matches
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    latitude: f64,
    longitude: f64,
}

/// `GET {base}/v1/search?name=<city>&count=1`
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    http: Client,
    base_url: String,
}

impl OpenMeteoGeocoder {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    async fn resolve(&self, city: &str) -> Result<GeocodeResult, GeocodeError> {
        let mut url = endpoint(SERVICE, &self.base_url, "v1/search")?;
        url.query_pairs_mut()
            .append_pair("name", city)
            .append_pair("count", "1");

        let body = get_body(SERVICE, &self.http, url).await?;
        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| UpstreamError::decode(SERVICE, e.to_string()))?;

        if parsed.results.is_empty() {
            return Err(GeocodeError::NotFound(city.to_string()));
        }

        debug!(city = %city, hits = parsed.results.len(), "geocoding response");
        Ok(GeocodeResult::new(
            parsed
                .results
                .into_iter()
                .map(|hit| Coordinate::new(hit.latitude, hit.longitude))
                .collect(),
        ))
    }
}
