//! Streamed relay delivery: incremental byte relay with curated headers.
//!
//! Hides the upstream URL from the client and keeps memory bounded by
//! relaying the body in fixed-size chunks as it arrives. Content-length
//! and transfer-encoding are never copied so the outer transport can
//! re-chunk the relayed body correctly.

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use reqwest::header::{
    ACCEPT_RANGES, ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE, EXPIRES, HeaderName,
};
use tracing::debug;

use super::chunk::rechunk;
use super::{
    DeliveredContent, DeliveryResult, DeliveryStrategy, classify_transport_error, copy_headers,
    fetch_source,
};
use crate::catalog::Episode;

/// Headers relayed from upstream to the client on the streamed path.
const RELAY_HEADERS: [HeaderName; 5] = [
    CONTENT_TYPE,
    ACCEPT_RANGES,
    CACHE_CONTROL,
    EXPIRES,
    ACCESS_CONTROL_ALLOW_ORIGIN,
];

pub struct StreamedRelay {
    client: reqwest::Client,
    chunk_size: usize,
}

impl StreamedRelay {
    pub fn new(client: reqwest::Client, chunk_size: usize) -> Self {
        Self { client, chunk_size }
    }
}

#[async_trait]
impl DeliveryStrategy for StreamedRelay {
    async fn deliver(&self, episode: &Episode) -> DeliveryResult<DeliveredContent> {
        let (url, response) = fetch_source(&self.client, episode).await?;
        let headers = copy_headers(response.headers(), &RELAY_HEADERS);

        debug!("relaying {url} in {}-byte chunks", self.chunk_size);
        let upstream = response
            .bytes_stream()
            .map_err(move |error| classify_transport_error(&url, error));
        let body = rechunk(upstream, self.chunk_size).boxed();

        Ok(DeliveredContent::Streamed { headers, body })
    }
}
