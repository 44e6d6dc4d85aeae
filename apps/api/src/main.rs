mod config;
mod errors;
mod matching;
mod models;
mod resume;
mod routes;
mod scholar;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::matching::catalogue::Catalogue;
use crate::matching::scoring::SkillOverlapMatcher;
use crate::routes::build_router;
use crate::scholar::client::HttpScholarSource;
use crate::scholar::rate_limit::RateLimiter;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Compass API v{}", env!("CARGO_PKG_VERSION"));

    let catalogue = match &config.catalogue_path {
        Some(path) => Catalogue::from_path(path)
            .with_context(|| format!("loading project catalogue from {}", path.display()))?,
        None => Catalogue::builtin(),
    };
    info!(
        templates = catalogue.templates().len(),
        custom = config.catalogue_path.is_some(),
        "Project catalogue loaded"
    );
    let matcher = Arc::new(SkillOverlapMatcher::new(Arc::new(catalogue)));

    let scholar_source = Arc::new(HttpScholarSource::new(Duration::from_secs(
        config.scholar_timeout_secs,
    ))?);
    let rate_limiter = Arc::new(RateLimiter::new(
        config.scholar_rate_limit,
        Duration::from_secs(config.scholar_rate_window_secs),
    ));
    info!(
        "Scholar fetch limited to {} requests per {}s",
        config.scholar_rate_limit, config.scholar_rate_window_secs
    );

    let state = AppState {
        config: config.clone(),
        matcher,
        scholar_source,
        rate_limiter,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
