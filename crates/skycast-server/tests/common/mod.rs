#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use skycast_core::{
    Coordinate, ForecastClient, GeocodeError, GeocodeResult, Geocoder, HistoryEntry,
    HistoryStore, PersistenceError, PersistenceResult, UpstreamError, WeatherObservation,
    WeatherResolver,
};
use skycast_db::MemoryHistoryStore;
use tower::ServiceExt;

/// Geocoder that knows a fixed set of names
#[derive(Default)]
pub struct FakeGeocoder {
    pub places: Vec<(String, Coordinate)>,
    pub broken: bool,
    pub calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn knowing(places: &[(&str, f64, f64)]) -> Self {
        Self {
            places: places
                .iter()
                .map(|(name, lat, lon)| (name.to_string(), Coordinate::new(*lat, *lon)))
                .collect(),
            ..Default::default()
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn resolve(&self, city: &str) -> Result<GeocodeResult, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.broken {
            return Err(UpstreamError::transport("geocoding", "connection reset").into());
        }
        let candidates: Vec<_> = self
            .places
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case(city.trim()))
            .map(|(_, coord)| *coord)
            .collect();
        if candidates.is_empty() {
            return Err(GeocodeError::NotFound(city.to_string()));
        }
        Ok(GeocodeResult::new(candidates))
    }
}

/// Forecast returning the same observation for every coordinate
pub struct FakeForecast {
    pub observation: Option<WeatherObservation>,
    pub calls: AtomicUsize,
}

impl FakeForecast {
    pub fn returning(temperature: f64, windspeed: f64, condition_code: i16) -> Self {
        Self {
            observation: Some(WeatherObservation {
                temperature,
                windspeed,
                condition_code,
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn broken() -> Self {
        Self {
            observation: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ForecastClient for FakeForecast {
    async fn current_weather(&self, _coord: Coordinate) -> Result<WeatherObservation, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.observation
            .ok_or_else(|| UpstreamError::decode("forecast", "missing current_weather"))
    }
}

/// History store whose every call fails
#[derive(Default)]
pub struct BrokenHistory {
    pub record_calls: AtomicUsize,
}

impl BrokenHistory {
    pub fn record_calls(&self) -> usize {
        self.record_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistoryStore for BrokenHistory {
    async fn record(&self, _city: &str) -> PersistenceResult<()> {
        self.record_calls.fetch_add(1, Ordering::SeqCst);
        Err(PersistenceError::new("connection pool timed out"))
    }

    async fn recent(&self, _limit: usize) -> PersistenceResult<Vec<HistoryEntry>> {
        Err(PersistenceError::new("connection pool timed out"))
    }
}

pub struct Harness {
    pub app: Router,
    pub geocoder: Arc<FakeGeocoder>,
    pub forecast: Arc<FakeForecast>,
}

pub fn harness(
    geocoder: FakeGeocoder,
    forecast: FakeForecast,
    history: Arc<dyn HistoryStore>,
) -> Harness {
    let geocoder = Arc::new(geocoder);
    let forecast = Arc::new(forecast);
    let resolver = WeatherResolver::new(geocoder.clone(), forecast.clone());
    let (app, _state) = skycast_server::build_app(resolver, history).unwrap();
    Harness {
        app,
        geocoder,
        forecast,
    }
}

pub fn london() -> FakeGeocoder {
    FakeGeocoder::knowing(&[("London", 51.5, -0.12)])
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(res: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Background history writes land shortly after the response
pub async fn wait_for_entries(store: &MemoryHistoryStore, n: usize) {
    for _ in 0..100 {
        if store.len().await >= n {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("history never reached {n} entries");
}
