//! Catalog API server: state assembly, routing and the serve loop.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use hikari_core::HikariConfig;
use hikari_core::catalog::{self, CatalogIndex, LoadReport, LoadStatus};
use hikari_core::delivery::{self, DeliveryStrategy};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::handlers::{anime_details, deliver_episode, diagnostics, list_animes, season_detail};

/// Shared application state.
///
/// The catalog snapshot is immutable after load, so it is shared across
/// handlers without locks.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogIndex>,
    pub load_report: Arc<LoadReport>,
    pub delivery: Arc<dyn DeliveryStrategy>,
}

/// Builds the API router over the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(diagnostics))
        .route("/animes", get(list_animes))
        .route("/animes/{slug}", get(anime_details))
        .route("/animes/{slug}/seasons/{position}", get(season_detail))
        .route(
            "/animes/{slug}/seasons/{position}/{episode_id}",
            get(deliver_episode),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Loads the catalog, assembles the state and serves until shutdown.
///
/// The load pass completes before the listener binds; a failed load keeps
/// the process up with an empty index and a degraded diagnostics report.
///
/// # Errors
/// - `HikariError::Configuration` - outbound client could not be built
/// - `HikariError::Io` - listener could not bind or the server failed
pub async fn run_server(config: HikariConfig) -> hikari_core::Result<()> {
    let candidates = catalog::candidate_paths(config.catalog.data_path.as_deref());
    let (index, report) = catalog::load_catalog(&candidates);
    if report.status != LoadStatus::Ok {
        warn!(
            "serving degraded catalog: {:?} ({})",
            report.status,
            report.detail.as_deref().unwrap_or("no detail")
        );
    }

    let client = delivery::outbound_client(&config.delivery)?;
    let state = AppState {
        catalog: Arc::new(index),
        load_report: Arc::new(report),
        delivery: delivery::strategy_for(client, &config.delivery),
    };

    let app = build_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    println!(
        "Hikari catalog API running on http://{addr} ({} delivery)",
        config.delivery.policy
    );
    axum::serve(listener, app).await?;
    Ok(())
}
