//! Error-to-HTTP mapping for the API surface.
//!
//! Resolver and delivery failures are plain error variants in core; this
//! is the one place they become status codes. Bodies use the
//! `{"detail": ...}` shape of the original service.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hikari_core::ResolveError;
use hikari_core::delivery::DeliveryError;
use serde_json::json;

/// Client-visible failures and their status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 404: anime, season or episode missing, or no playable sources
    #[error("{0}")]
    NotFound(String),

    /// 503: upstream transport failure or error status
    #[error("{0}")]
    Upstream(String),

    /// 504: upstream connect/read timeout
    #[error("{0}")]
    UpstreamTimeout(String),
}

impl From<ResolveError> for ApiError {
    fn from(error: ResolveError) -> Self {
        ApiError::NotFound(error.to_string())
    }
}

impl From<DeliveryError> for ApiError {
    fn from(error: DeliveryError) -> Self {
        match &error {
            DeliveryError::NoSources { .. } => ApiError::NotFound(error.to_string()),
            DeliveryError::UpstreamTimeout { .. } => ApiError::UpstreamTimeout(error.to_string()),
            DeliveryError::UpstreamStatus { .. } | DeliveryError::UpstreamUnavailable { .. } => {
                ApiError::Upstream(error.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_errors_are_not_found() {
        let error = ApiError::from(ResolveError::AnimeNotFound {
            slug: "demo".to_string(),
        });
        assert!(matches!(error, ApiError::NotFound(_)));
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_delivery_error_status_mapping() {
        let no_sources = ApiError::from(DeliveryError::NoSources {
            episode: "1".to_string(),
        });
        assert_eq!(no_sources.into_response().status(), StatusCode::NOT_FOUND);

        let timeout = ApiError::from(DeliveryError::UpstreamTimeout {
            url: "http://x/v.ts".to_string(),
        });
        assert_eq!(
            timeout.into_response().status(),
            StatusCode::GATEWAY_TIMEOUT
        );

        let status = ApiError::from(DeliveryError::UpstreamStatus {
            status: 500,
            url: "http://x/v.ts".to_string(),
        });
        assert_eq!(
            status.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
