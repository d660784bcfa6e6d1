//! Handlers for diagnostics and catalog navigation.

use axum::Json;
use axum::extract::{Path, State};
use hikari_core::catalog::{self, LoadStatus};
use hikari_core::{Anime, AnimeSummary, SeasonDetail};
use serde::Serialize;

use crate::error::ApiError;
use crate::server::AppState;

/// Load outcome and dataset size, served at the root path.
#[derive(Serialize)]
pub struct Diagnostics {
    pub status: LoadStatus,
    pub detail: Option<String>,
    pub entries: usize,
    pub message: String,
}

pub async fn diagnostics(State(state): State<AppState>) -> Json<Diagnostics> {
    let report = &state.load_report;
    let message = match report.status {
        LoadStatus::Ok => format!("anime catalog online with {} titles", report.entries),
        _ => "anime catalog degraded, see detail".to_string(),
    };

    Json(Diagnostics {
        status: report.status,
        detail: report.detail.clone(),
        entries: report.entries,
        message,
    })
}

pub async fn list_animes(State(state): State<AppState>) -> Json<Vec<AnimeSummary>> {
    Json(state.catalog.summaries())
}

pub async fn anime_details(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Anime>, ApiError> {
    let anime = catalog::resolve_anime(&state.catalog, &slug)?;
    Ok(Json(anime.clone()))
}

pub async fn season_detail(
    State(state): State<AppState>,
    Path((slug, position)): Path<(String, i64)>,
) -> Result<Json<SeasonDetail>, ApiError> {
    let anime = catalog::resolve_anime(&state.catalog, &slug)?;
    let season = catalog::resolve_season(anime, position)?;
    Ok(Json(season.clone()))
}
