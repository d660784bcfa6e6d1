//! Episode delivery handler: three-level resolution, then hand-off to the
//! configured delivery strategy.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use hikari_core::catalog;
use hikari_core::delivery::DeliveredContent;
use tracing::info;

use crate::error::ApiError;
use crate::server::AppState;

pub async fn deliver_episode(
    State(state): State<AppState>,
    Path((slug, position, episode_id)): Path<(String, i64, String)>,
) -> Result<Response, ApiError> {
    // Each level short-circuits: no season lookup on a missed slug
    let anime = catalog::resolve_anime(&state.catalog, &slug)?;
    let season = catalog::resolve_season(anime, position)?;
    let episode = catalog::resolve_episode(season, &episode_id)?;

    info!("delivering {slug}/seasons/{position}/{episode_id}");
    let content = state.delivery.deliver(episode).await?;

    let response = match content {
        DeliveredContent::Redirect { location } => {
            let value = HeaderValue::from_str(&location)
                .map_err(|_| ApiError::Upstream(format!("invalid source link: {location}")))?;
            let mut response = StatusCode::TEMPORARY_REDIRECT.into_response();
            response.headers_mut().insert(header::LOCATION, value);
            response
        }
        DeliveredContent::Streamed { headers, body } => {
            let mut response = Body::from_stream(body).into_response();
            response.headers_mut().extend(headers);
            response
        }
        DeliveredContent::Buffered { headers, body } => {
            let mut response = Body::from(body).into_response();
            response.headers_mut().extend(headers);
            response
        }
    };
    Ok(response)
}
