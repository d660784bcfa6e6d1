//! Catalog data model, one-shot loader and navigation resolver
//!
//! All entities are constructed during the single load pass at startup and
//! are never mutated afterwards, so the index can be shared across request
//! handlers without locking.

pub mod index;
pub mod loader;
pub mod resolver;

use serde::{Deserialize, Serialize};

pub use index::CatalogIndex;
pub use loader::{CATALOG_FILE_NAME, LoadReport, LoadStatus, candidate_paths, load_catalog};
pub use resolver::{ResolveError, resolve_anime, resolve_episode, resolve_season};

/// A single episode within a season.
///
/// The episode number is an opaque identifier, not necessarily
/// numeric-sortable: "01" and "1" are distinct episodes. `player_urls`
/// may be empty for placeholder entries that have no playable source yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub episode_number: String,
    pub title: String,
    pub player_urls: Vec<String>,
}

/// A named season with its episodes in canonical order.
///
/// Seasons are addressed 1-based externally and 0-based internally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonDetail {
    pub season_name: String,
    pub episodes: Vec<Episode>,
}

/// The listing view of a catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeSummary {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub release: String,
    pub imdb_rating: String,
    pub time: String,
}

/// A full catalog entry: the summary plus imagery, genre data, a free-form
/// details bag and the season tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anime {
    #[serde(flatten)]
    pub summary: AnimeSummary,
    pub genre: String,
    pub genres: Vec<String>,
    pub image: String,
    pub cover_url: String,
    pub details: serde_json::Map<String, serde_json::Value>,
    pub synopsis: String,
    pub seasons: Vec<SeasonDetail>,
}

impl Anime {
    /// Returns the listing view of this entry.
    pub fn summary(&self) -> &AnimeSummary {
        &self.summary
    }

    /// Returns the URL-friendly identifier.
    pub fn slug(&self) -> &str {
        &self.summary.slug
    }

    /// Returns the display title.
    pub fn title(&self) -> &str {
        &self.summary.title
    }
}
