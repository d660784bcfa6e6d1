//! End-to-end tests for the relay delivery policies against stub upstream
//! sources: header fidelity, body fidelity, and the upstream failure
//! taxonomy.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use hikari_core::config::{DeliveryConfig, DeliveryPolicy};
use serde_json::Value;

use crate::support::{api_client, demo_document, spawn_catalog_app, spawn_upstream};

fn payload() -> Vec<u8> {
    (0..10_000u32).map(|i| (i % 251) as u8).collect()
}

async fn video() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "video/mp2t"),
            (header::CACHE_CONTROL, "max-age=60"),
            (HeaderName::from_static("x-upstream-secret"), "internal"),
        ],
        payload(),
    )
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_millis(1500)).await;
    "late"
}

fn upstream_router() -> Router {
    Router::new()
        .route("/video.ts", get(video))
        .route("/error", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/slow", get(slow))
}

fn relay_config(policy: DeliveryPolicy) -> DeliveryConfig {
    DeliveryConfig {
        policy,
        connect_timeout: Duration::from_millis(500),
        read_timeout: Duration::from_millis(300),
        relay_chunk_size: 1024,
        user_agent: "hikari-tests/0.1",
    }
}

#[tokio::test]
async fn test_streamed_relay_copies_curated_headers_and_body() {
    let upstream = spawn_upstream(upstream_router()).await;
    let document = demo_document(&format!("http://{upstream}/video.ts"));
    let addr = spawn_catalog_app(&document, relay_config(DeliveryPolicy::Streamed)).await;

    let response = api_client()
        .get(format!("http://{addr}/animes/demo/seasons/1/2"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let headers = response.headers();
    assert_eq!(headers.get("content-type").unwrap(), "video/mp2t");
    assert_eq!(headers.get("cache-control").unwrap(), "max-age=60");
    // Off-list headers stay behind, and content-length is dropped so the
    // outer transport re-chunks
    assert!(headers.get("x-upstream-secret").is_none());
    assert!(headers.get("content-length").is_none());

    let body = response.bytes().await.unwrap();
    assert_eq!(body.as_ref(), payload().as_slice());
}

#[tokio::test]
async fn test_buffered_relay_preserves_content_length() {
    let upstream = spawn_upstream(upstream_router()).await;
    let document = demo_document(&format!("http://{upstream}/video.ts"));
    let addr = spawn_catalog_app(&document, relay_config(DeliveryPolicy::Buffered)).await;

    let response = api_client()
        .get(format!("http://{addr}/animes/demo/seasons/1/2"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers().get("content-length").unwrap(),
        &payload().len().to_string()
    );

    let body = response.bytes().await.unwrap();
    assert_eq!(body.as_ref(), payload().as_slice());
}

#[tokio::test]
async fn test_upstream_error_status_maps_to_503() {
    let upstream = spawn_upstream(upstream_router()).await;
    let document = demo_document(&format!("http://{upstream}/error"));
    let addr = spawn_catalog_app(&document, relay_config(DeliveryPolicy::Streamed)).await;

    let response = api_client()
        .get(format!("http://{addr}/animes/demo/seasons/1/2"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 503);
    let body: Value = response.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("status 500"));
}

#[tokio::test]
async fn test_unreachable_upstream_maps_to_503() {
    // Bind then drop a listener so the port is closed
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed = listener.local_addr().unwrap();
    drop(listener);

    let document = demo_document(&format!("http://{closed}/video.ts"));
    let addr = spawn_catalog_app(&document, relay_config(DeliveryPolicy::Buffered)).await;

    let response = api_client()
        .get(format!("http://{addr}/animes/demo/seasons/1/2"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 503);
}

#[tokio::test]
async fn test_upstream_timeout_maps_to_504() {
    let upstream = spawn_upstream(upstream_router()).await;
    let document = demo_document(&format!("http://{upstream}/slow"));
    let addr = spawn_catalog_app(&document, relay_config(DeliveryPolicy::Streamed)).await;

    let response = api_client()
        .get(format!("http://{addr}/animes/demo/seasons/1/2"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 504);
    let body: Value = response.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("timed out"));
}
