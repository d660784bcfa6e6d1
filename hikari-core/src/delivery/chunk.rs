//! Fixed-size re-chunking of an upstream byte stream.
//!
//! Upstream chunk boundaries follow network reads and are unpredictable;
//! the relay emits uniform chunks so memory use stays bounded regardless
//! of payload size. The final chunk may be short.

use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;

use super::DeliveryResult;

struct RechunkState<S> {
    upstream: Pin<Box<S>>,
    buffer: BytesMut,
    done: bool,
}

/// Adapts `upstream` into a stream of `chunk_size`-byte chunks.
///
/// An upstream error ends the stream after being yielded; buffered bytes
/// are discarded at that point since the relay cannot complete anyway.
pub fn rechunk<S>(upstream: S, chunk_size: usize) -> impl Stream<Item = DeliveryResult<Bytes>>
where
    S: Stream<Item = DeliveryResult<Bytes>> + Send + 'static,
{
    let chunk_size = chunk_size.max(1);
    let state = RechunkState {
        upstream: Box::pin(upstream),
        buffer: BytesMut::new(),
        done: false,
    };

    futures::stream::unfold(state, move |mut state| async move {
        loop {
            if state.buffer.len() >= chunk_size {
                let chunk = state.buffer.split_to(chunk_size).freeze();
                return Some((Ok(chunk), state));
            }
            if state.done {
                if state.buffer.is_empty() {
                    return None;
                }
                let tail = state.buffer.split().freeze();
                return Some((Ok(tail), state));
            }
            match state.upstream.next().await {
                Some(Ok(bytes)) => state.buffer.extend_from_slice(&bytes),
                Some(Err(error)) => {
                    state.done = true;
                    state.buffer.clear();
                    return Some((Err(error), state));
                }
                None => state.done = true,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::*;
    use crate::delivery::DeliveryError;

    fn input(parts: &[&[u8]]) -> Vec<DeliveryResult<Bytes>> {
        parts.iter().map(|p| Ok(Bytes::copy_from_slice(p))).collect()
    }

    async fn collect(parts: Vec<DeliveryResult<Bytes>>, size: usize) -> Vec<DeliveryResult<Bytes>> {
        rechunk(futures::stream::iter(parts), size).collect().await
    }

    #[tokio::test]
    async fn test_uniform_chunks_with_short_tail() {
        let chunks = collect(input(&[b"abcdefg", b"hij"]), 4).await;

        let bytes: Vec<_> = chunks.into_iter().map(|c| c.unwrap()).collect();
        assert_eq!(bytes, vec!["abcd", "efgh", "ij"]);
    }

    #[tokio::test]
    async fn test_small_upstream_reads_are_coalesced() {
        let chunks = collect(input(&[b"ab", b"cd", b"ef"]), 4).await;

        let bytes: Vec<_> = chunks.into_iter().map(|c| c.unwrap()).collect();
        assert_eq!(bytes, vec!["abcd", "ef"]);
    }

    #[tokio::test]
    async fn test_exact_multiple_has_no_tail() {
        let chunks = collect(input(&[b"abcdefgh"]), 4).await;
        assert_eq!(chunks.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_upstream_yields_nothing() {
        let chunks = collect(Vec::new(), 4).await;
        assert!(chunks.is_empty());
    }

    #[tokio::test]
    async fn test_upstream_error_ends_stream() {
        let parts = vec![
            Ok(Bytes::from_static(b"abcdef")),
            Err(DeliveryError::UpstreamUnavailable {
                reason: "reset".to_string(),
            }),
        ];
        let chunks = collect(parts, 4).await;

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].as_ref().unwrap().as_ref(), b"abcd");
        assert!(chunks[1].is_err());
    }
}
