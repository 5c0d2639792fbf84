//! City name to weather report resolution

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    conditions, ForecastClient, GeocodeError, Geocoder, ResolveError, ResolveResult,
    WeatherReport,
};

/// Chains a [`Geocoder`] and a [`ForecastClient`] into one lookup.
///
/// No step is retried. A failed upstream call fails the whole lookup and
/// the caller decides whether to try again.
#[derive(Clone)]
pub struct WeatherResolver {
    geocoder: Arc<dyn Geocoder>,
    forecast: Arc<dyn ForecastClient>,
}

impl WeatherResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>, forecast: Arc<dyn ForecastClient>) -> Self {
        Self { geocoder, forecast }
    }

    /// Resolve `city` to its current weather.
    ///
    /// The returned report carries `city` verbatim, not the name the
    /// geocoder matched.
    pub async fn resolve_city(&self, city: &str) -> ResolveResult<WeatherReport> {
        let result = match self.geocoder.resolve(city).await {
            Ok(result) => result,
            Err(GeocodeError::NotFound(_)) => {
                debug!(city = %city, "geocoder has no candidates");
                return Err(ResolveError::CityNotFound(city.to_string()));
            }
            Err(GeocodeError::Upstream(e)) => {
                warn!(city = %city, kind = e.kind(), error = %e, "geocoding failed");
                return Err(ResolveError::UpstreamFailure(e));
            }
        };

        let coord = *result
            .best_match()
            .ok_or_else(|| ResolveError::CityNotFound(city.to_string()))?;
        debug!(
            city = %city,
            latitude = coord.latitude,
            longitude = coord.longitude,
            candidates = result.candidates.len(),
            "geocoded"
        );

        let observation = self.forecast.current_weather(coord).await.map_err(|e| {
            warn!(city = %city, kind = e.kind(), error = %e, "forecast lookup failed");
            ResolveError::UpstreamFailure(e)
        })?;

        Ok(WeatherReport {
            city: city.to_string(),
            temperature: observation.temperature,
            windspeed: observation.windspeed,
            description: conditions::describe(observation.condition_code).to_string(),
        })
    }
}
