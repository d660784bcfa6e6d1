//! Redirect delivery: point the client straight at the source link.
//!
//! Lowest latency and zero server bandwidth, at the cost of exposing the
//! upstream URL to the client. No outbound fetch is performed.

use async_trait::async_trait;
use tracing::debug;

use super::{DeliveredContent, DeliveryResult, DeliveryStrategy, first_source};
use crate::catalog::Episode;

pub struct RedirectDelivery;

#[async_trait]
impl DeliveryStrategy for RedirectDelivery {
    async fn deliver(&self, episode: &Episode) -> DeliveryResult<DeliveredContent> {
        let location = first_source(episode)?.to_string();
        debug!("redirecting episode {} to source", episode.episode_number);
        Ok(DeliveredContent::Redirect { location })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::DeliveryError;

    #[tokio::test]
    async fn test_redirects_to_first_source() {
        let episode = Episode {
            episode_number: "2".to_string(),
            title: "Second".to_string(),
            player_urls: vec!["http://x/video.ts".to_string(), "http://x/alt.ts".to_string()],
        };

        match RedirectDelivery.deliver(&episode).await.unwrap() {
            DeliveredContent::Redirect { location } => {
                assert_eq!(location, "http://x/video.ts");
            }
            _ => panic!("expected redirect"),
        }
    }

    #[tokio::test]
    async fn test_no_sources_fails() {
        let episode = Episode {
            episode_number: "1".to_string(),
            title: "First".to_string(),
            player_urls: Vec::new(),
        };

        let error = RedirectDelivery.deliver(&episode).await.unwrap_err();
        assert!(matches!(error, DeliveryError::NoSources { .. }));
    }
}
