//! Hikari Web - JSON API server
//!
//! Read-only catalog endpoints (diagnostics, listing, navigation) plus the
//! policy-dependent episode delivery route. The catalog snapshot is built
//! once before the listener binds; handlers never observe a partial index.

pub mod error;
pub mod handlers;
pub mod server;

// Re-export main types
pub use server::{AppState, build_router, run_server};
