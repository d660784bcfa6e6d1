//! Buffered relay delivery: read the whole upstream body, then respond.
//!
//! Memory cost scales with payload size and latency equals the full
//! upstream transfer time, so this path is only suitable for small
//! payloads such as playlist manifests.

use async_trait::async_trait;
use reqwest::header::{ACCEPT_RANGES, CONTENT_LENGTH, CONTENT_TYPE, HeaderName, TRANSFER_ENCODING};
use tracing::debug;

use super::{
    DeliveredContent, DeliveryResult, DeliveryStrategy, classify_transport_error, copy_headers,
    fetch_source,
};
use crate::catalog::Episode;

/// Headers copied verbatim from upstream on the buffered path.
const COPIED_HEADERS: [HeaderName; 4] =
    [CONTENT_TYPE, CONTENT_LENGTH, ACCEPT_RANGES, TRANSFER_ENCODING];

pub struct BufferedRelay {
    client: reqwest::Client,
}

impl BufferedRelay {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DeliveryStrategy for BufferedRelay {
    async fn deliver(&self, episode: &Episode) -> DeliveryResult<DeliveredContent> {
        let (url, response) = fetch_source(&self.client, episode).await?;
        let headers = copy_headers(response.headers(), &COPIED_HEADERS);

        let body = response
            .bytes()
            .await
            .map_err(|error| classify_transport_error(&url, error))?;
        debug!("buffered {} bytes from {url}", body.len());

        Ok(DeliveredContent::Buffered { headers, body })
    }
}
