//! Hikari Core - catalog model, navigation and content delivery
//!
//! This crate provides the building blocks for the read-only anime catalog
//! API: the catalog data model, the one-shot loader, the slug index, the
//! three-level navigation resolver, the content delivery strategies, and
//! configuration management.

pub mod catalog;
pub mod config;
pub mod delivery;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use catalog::{Anime, AnimeSummary, CatalogIndex, Episode, LoadReport, LoadStatus, SeasonDetail};
pub use catalog::resolver::ResolveError;
pub use config::HikariConfig;
pub use delivery::{DeliveryError, DeliveryStrategy};

/// Errors that can bubble up from any Hikari subsystem.
#[derive(Debug, thiserror::Error)]
pub enum HikariError {
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HikariError>;
