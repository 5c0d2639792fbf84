//! HTTP surface for city weather lookups and search history

pub mod error;

pub use error::ApiError;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::Html,
    routing::get,
    Json, Router,
};
use opentelemetry::{
    metrics::{Counter, MeterProvider},
    KeyValue,
};
use opentelemetry_prometheus::exporter;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use prometheus::{Encoder, Registry, TextEncoder};
use serde::Deserialize;
use skycast_config::AppConfig;
use skycast_core::{HistoryEntry, HistoryStore, ResolveError, WeatherReport, WeatherResolver};
use skycast_upstream::{OpenMeteoForecast, OpenMeteoGeocoder};
use tracing::{debug, warn};

/// Most entries `/history` will return
pub const HISTORY_LIMIT: usize = 10;

const INDEX_HTML: &str = include_str!("../static/index.html");

pub struct AppState {
    ready: AtomicBool,
    registry: Registry,
    #[allow(dead_code)]
    provider: SdkMeterProvider,
    requests_total: Counter<u64>,
    lookups_total: Counter<u64>,
    resolver: WeatherResolver,
    history: Arc<dyn HistoryStore>,
}

impl AppState {
    fn count_lookup(&self, outcome: &'static str) {
        self.lookups_total
            .add(1, &[KeyValue::new("outcome", outcome)]);
    }
}

pub fn build_app(
    resolver: WeatherResolver,
    history: Arc<dyn HistoryStore>,
) -> Result<(Router, Arc<AppState>)> {
    // Prometheus exporter via OpenTelemetry
    let registry = Registry::new();
    let reader = exporter()
        .with_registry(registry.clone())
        .build()
        .context("failed to build prometheus exporter")?;
    let provider = SdkMeterProvider::builder().with_reader(reader).build();
    let meter = provider.meter("skycast-server");

    let requests_total = meter
        .u64_counter("skycast_http_requests")
        .with_description("Total HTTP requests served")
        .init();
    let lookups_total = meter
        .u64_counter("skycast_weather_lookups")
        .with_description("Weather lookups by outcome")
        .init();

    let state = Arc::new(AppState {
        ready: AtomicBool::new(false),
        registry,
        provider,
        requests_total,
        lookups_total,
        resolver,
        history,
    });

    let router = Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .route("/weather", get(weather))
        .route("/history", get(recent_history))
        .with_state(Arc::clone(&state));

    Ok((router, state))
}

/// Wire the Open-Meteo clients named in `cfg` into a resolver.
pub fn resolver_from_config(cfg: &AppConfig) -> Result<WeatherResolver> {
    let http = skycast_upstream::http_client(cfg.upstream_timeout())
        .context("failed to build HTTP client")?;
    Ok(WeatherResolver::new(
        Arc::new(OpenMeteoGeocoder::new(http.clone(), cfg.geocode_url())),
        Arc::new(OpenMeteoForecast::new(http, cfg.forecast_url())),
    ))
}

pub fn set_ready(state: &Arc<AppState>, is_ready: bool) {
    state.ready.store(is_ready, Ordering::Relaxed);
}

async fn index(State(state): State<Arc<AppState>>) -> Html<&'static str> {
    state.requests_total.add(1, &[]);
    Html(INDEX_HTML)
}

async fn healthz(State(state): State<Arc<AppState>>) -> StatusCode {
    state.requests_total.add(1, &[]);
    StatusCode::OK
}

async fn readyz(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.ready.load(Ordering::Relaxed) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn metrics(
    State(state): State<Arc<AppState>>,
) -> (
    [(axum::http::header::HeaderName, axum::http::HeaderValue); 1],
    String,
) {
    let encoder = TextEncoder::new();
    let metric_families = state.registry.gather();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buf) {
        warn!(error=?e, "failed to encode metrics");
    }
    let body = String::from_utf8(buf).unwrap_or_default();
    let header = (
        header::CONTENT_TYPE,
        axum::http::HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    ([header], body)
}

#[derive(Deserialize)]
struct WeatherQuery {
    city: Option<String>,
}

async fn weather(
    State(state): State<Arc<AppState>>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<WeatherReport>, ApiError> {
    state.requests_total.add(1, &[]);

    let Query(q) = query.map_err(|rejection| {
        state.count_lookup("invalid");
        ApiError::InvalidRequest(format!("invalid query string: {}", rejection.body_text()))
    })?;

    let city = match q.city {
        Some(city) if !city.trim().is_empty() => city,
        _ => {
            state.count_lookup("invalid");
            return Err(ApiError::InvalidRequest(
                "missing required query parameter 'city'".into(),
            ));
        }
    };

    let report = match state.resolver.resolve_city(&city).await {
        Ok(report) => report,
        Err(e) => {
            state.count_lookup(match e {
                ResolveError::CityNotFound(_) => "not_found",
                ResolveError::UpstreamFailure(_) => "upstream_failure",
            });
            return Err(e.into());
        }
    };
    state.count_lookup("found");

    record_search(&state, city);
    Ok(Json(report))
}

/// Append to history off the request path. Failures are logged only.
fn record_search(state: &Arc<AppState>, city: String) {
    let history = Arc::clone(&state.history);
    // Detached: a write still in flight at shutdown is lost.
    tokio::spawn(async move {
        match history.record(&city).await {
            Ok(()) => debug!(city = %city, "search recorded"),
            Err(e) => warn!(city = %city, error = %e, "failed to record search"),
        }
    });
}

#[derive(Deserialize)]
struct HistoryQuery {
    limit: Option<String>,
}

impl HistoryQuery {
    /// Unparsable or out-of-range limits fall back to the cap.
    fn limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(|l| l.trim().parse::<usize>().ok())
            .unwrap_or(HISTORY_LIMIT)
            .min(HISTORY_LIMIT)
    }
}

async fn recent_history(
    State(state): State<Arc<AppState>>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    state.requests_total.add(1, &[]);
    let limit = query.map_or(HISTORY_LIMIT, |Query(q)| q.limit());
    let entries = state.history.recent(limit).await.map_err(|e| {
        warn!(error = %e, "failed to read search history");
        ApiError::from(e)
    })?;
    Ok(Json(entries))
}
