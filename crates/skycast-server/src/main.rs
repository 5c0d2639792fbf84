//! Skycast daemon
//!
//! Serves `/weather` and `/history` over HTTP, resolving cities through
//! Open-Meteo and logging successful searches.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use skycast_config::{AppConfig, HistoryBackend, LogFormat};
use skycast_core::HistoryStore;
use skycast_db::{DbConnectionBuilder, MemoryHistoryStore, PgHistoryStore};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cfg = AppConfig::load().context("Failed to load configuration")?;
    skycast_obs::init("skycastd", cfg.log_format() == LogFormat::Json);

    let resolver = skycast_server::resolver_from_config(&cfg)?;
    let history = open_history(&cfg).await?;

    let (app, state) = skycast_server::build_app(resolver, history)?;

    let addr: SocketAddr = cfg
        .http_bind()
        .parse()
        .context("Invalid HTTP bind address")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    // Mark ready just before serving
    skycast_server::set_ready(&state, true);

    info!(%addr, "HTTP server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Skycast stopped");
    Ok(())
}

async fn open_history(cfg: &AppConfig) -> Result<Arc<dyn HistoryStore>> {
    match cfg.history_backend() {
        HistoryBackend::Memory => {
            warn!("search history is kept in memory and lost on restart");
            Ok(Arc::new(MemoryHistoryStore::new()))
        }
        HistoryBackend::Postgres => {
            let db = cfg.database();
            let mut builder = DbConnectionBuilder::new(&db.name)
                .host(&db.host)
                .port(db.port)
                .username(&db.user);
            if let Some(password) = &db.password {
                builder = builder.password(password);
            }

            let store = PgHistoryStore::connect(builder.build(), db.max_connections)
                .await
                .with_context(|| {
                    format!(
                        "Failed to open history database {} at {}:{}",
                        db.name, db.host, db.port
                    )
                })?;
            Ok(Arc::new(store))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = ?e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
