//! Integration tests for Hikari
//!
//! These tests drive the HTTP surface end-to-end: a real listener, a real
//! client, and stub upstream sources for the relay policies.

#[path = "integration/support.rs"]
mod support;

#[path = "integration/catalog_api.rs"]
mod catalog_api;

#[path = "integration/delivery_relay.rs"]
mod delivery_relay;
