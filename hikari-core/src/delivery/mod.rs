//! Content delivery strategies for resolved episodes.
//!
//! An episode's source links point at externally hosted video. The three
//! historical delivery designs are modeled as one polymorphic strategy
//! selected by configuration: redirect (no outbound fetch), streamed relay
//! (incremental, bounded memory) and buffered relay (whole body in memory,
//! for small payloads such as playlist manifests).

pub mod buffered;
pub mod chunk;
pub mod redirect;
pub mod streamed;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use reqwest::header::{HeaderMap, HeaderName};

pub use buffered::BufferedRelay;
pub use redirect::RedirectDelivery;
pub use streamed::StreamedRelay;

use crate::catalog::Episode;
use crate::config::{DeliveryConfig, DeliveryPolicy};

/// Result type for delivery operations
pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Errors that can occur while delivering a resolved episode.
///
/// Outbound fetches are single attempts; there is no retry. The web layer
/// maps `NoSources` to 404, `UpstreamTimeout` to 504 and the remaining
/// upstream variants to 503.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("episode '{episode}' has no playable sources")]
    NoSources { episode: String },

    #[error("upstream fetch timed out: {url}")]
    UpstreamTimeout { url: String },

    #[error("upstream returned status {status}: {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("upstream unreachable: {reason}")]
    UpstreamUnavailable { reason: String },
}

/// What a strategy hands back to the web layer.
pub enum DeliveredContent {
    /// Temporary, method-preserving redirect to the source link
    Redirect { location: String },
    /// Incremental relay: curated headers plus a chunked body stream.
    /// Dropping the stream aborts the outbound connection.
    Streamed {
        headers: HeaderMap,
        body: BoxStream<'static, DeliveryResult<Bytes>>,
    },
    /// Whole-body relay with upstream headers copied verbatim
    Buffered { headers: HeaderMap, body: Bytes },
}

impl std::fmt::Debug for DeliveredContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveredContent::Redirect { location } => f
                .debug_struct("Redirect")
                .field("location", location)
                .finish(),
            DeliveredContent::Streamed { headers, .. } => f
                .debug_struct("Streamed")
                .field("headers", headers)
                .field("body", &"<stream>")
                .finish(),
            DeliveredContent::Buffered { headers, body } => f
                .debug_struct("Buffered")
                .field("headers", headers)
                .field("body", body)
                .finish(),
        }
    }
}

/// Delivery strategy for resolved episodes.
#[async_trait]
pub trait DeliveryStrategy: Send + Sync {
    /// Produces playable content for the episode, or a delivery error.
    async fn deliver(&self, episode: &Episode) -> DeliveryResult<DeliveredContent>;
}

/// Builds the outbound HTTP client shared by the relay policies: bounded
/// connect/read timeouts, configured user agent, no retries.
pub fn outbound_client(config: &DeliveryConfig) -> crate::Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(config.connect_timeout)
        .read_timeout(config.read_timeout)
        .user_agent(config.user_agent)
        .build()
        .map_err(|error| crate::HikariError::Configuration {
            reason: error.to_string(),
        })
}

/// Builds the strategy selected by configuration.
pub fn strategy_for(client: reqwest::Client, config: &DeliveryConfig) -> Arc<dyn DeliveryStrategy> {
    match config.policy {
        DeliveryPolicy::Redirect => Arc::new(RedirectDelivery),
        DeliveryPolicy::Streamed => {
            Arc::new(StreamedRelay::new(client, config.relay_chunk_size))
        }
        DeliveryPolicy::Buffered => Arc::new(BufferedRelay::new(client)),
    }
}

/// Returns the episode's first source link, the one every policy uses.
pub(crate) fn first_source(episode: &Episode) -> DeliveryResult<&str> {
    episode
        .player_urls
        .first()
        .map(String::as_str)
        .ok_or_else(|| DeliveryError::NoSources {
            episode: episode.episode_number.clone(),
        })
}

/// Opens the outbound GET for the relay policies: one attempt, bounded by
/// the client's connect/read timeouts, non-2xx surfaced as upstream failure.
pub(crate) async fn fetch_source(
    client: &reqwest::Client,
    episode: &Episode,
) -> DeliveryResult<(String, reqwest::Response)> {
    let url = first_source(episode)?.to_string();
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|error| classify_transport_error(&url, error))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DeliveryError::UpstreamStatus {
            status: status.as_u16(),
            url,
        });
    }
    Ok((url, response))
}

/// Splits transport failures into the timeout and everything-else buckets.
pub(crate) fn classify_transport_error(url: &str, error: reqwest::Error) -> DeliveryError {
    if error.is_timeout() {
        DeliveryError::UpstreamTimeout {
            url: url.to_string(),
        }
    } else {
        DeliveryError::UpstreamUnavailable {
            reason: error.to_string(),
        }
    }
}

/// Copies the named headers from an upstream response. Headers not on the
/// list stay behind.
pub(crate) fn copy_headers(source: &HeaderMap, names: &[HeaderName]) -> HeaderMap {
    let mut copied = HeaderMap::new();
    for name in names {
        if let Some(value) = source.get(name) {
            copied.insert(name.clone(), value.clone());
        }
    }
    copied
}

#[cfg(test)]
mod tests {
    use reqwest::header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, HeaderValue};

    use super::*;

    fn episode(urls: &[&str]) -> Episode {
        Episode {
            episode_number: "1".to_string(),
            title: "First".to_string(),
            player_urls: urls.iter().map(|u| u.to_string()).collect(),
        }
    }

    #[test]
    fn test_first_source_picks_head_of_list() {
        let episode = episode(&["http://x/a.ts", "http://x/b.ts"]);
        assert_eq!(first_source(&episode).unwrap(), "http://x/a.ts");
    }

    #[test]
    fn test_first_source_empty_is_no_sources() {
        let episode = episode(&[]);
        assert!(matches!(
            first_source(&episode),
            Err(DeliveryError::NoSources { .. })
        ));
    }

    #[test]
    fn test_copy_headers_filters_by_name() {
        let mut upstream = HeaderMap::new();
        upstream.insert(CONTENT_TYPE, HeaderValue::from_static("video/mp2t"));
        upstream.insert(CONTENT_LENGTH, HeaderValue::from_static("1024"));
        upstream.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let copied = copy_headers(&upstream, &[CONTENT_TYPE, CACHE_CONTROL]);

        assert_eq!(copied.get(CONTENT_TYPE).unwrap(), "video/mp2t");
        assert_eq!(copied.get(CACHE_CONTROL).unwrap(), "no-cache");
        assert!(copied.get(CONTENT_LENGTH).is_none());
    }
}
