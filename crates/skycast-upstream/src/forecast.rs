//! Current conditions from the Open-Meteo forecast API

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use skycast_core::{Coordinate, ForecastClient, UpstreamError, WeatherObservation};
use tracing::debug;

use crate::{endpoint, get_body};

const SERVICE: &str = "forecast";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: i16,
}

/// `GET {base}/v1/forecast?latitude=..&longitude=..&current_weather=true`
#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    http: Client,
    base_url: String,
}

impl OpenMeteoForecast {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ForecastClient for OpenMeteoForecast {
    async fn current_weather(&self, coord: Coordinate) -> Result<WeatherObservation, UpstreamError> {
        let mut url = endpoint(SERVICE, &self.base_url, "v1/forecast")?;
        url.query_pairs_mut()
            .append_pair("latitude", &coord.latitude.to_string())
            .append_pair("longitude", &coord.longitude.to_string())
            .append_pair("current_weather", "true");

        let body = get_body(SERVICE, &self.http, url).await?;
        let parsed: ForecastResponse = serde_json::from_str(&body)
            .map_err(|e| UpstreamError::decode(SERVICE, e.to_string()))?;

        let current = parsed.current_weather;
        debug!(
            latitude = coord.latitude,
            longitude = coord.longitude,
            weathercode = current.weathercode,
            "forecast response"
        );

        Ok(WeatherObservation {
            temperature: current.temperature,
            windspeed: current.windspeed,
            condition_code: current.weathercode,
        })
    }
}
