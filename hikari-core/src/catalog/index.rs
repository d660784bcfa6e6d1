//! Immutable slug index over the loaded catalog.

use std::collections::HashMap;

use super::{Anime, AnimeSummary};

/// Mapping from slug to full catalog entry.
///
/// Built once by the loader and read-only afterwards. Point lookups are
/// O(1); enumeration walks entries in load order. A slug collision keeps
/// the first insertion position but replaces the value (last wins).
#[derive(Debug, Default)]
pub struct CatalogIndex {
    entries: HashMap<String, Anime>,
    order: Vec<String>,
}

impl CatalogIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry under its slug. Later entries with the same slug
    /// silently replace earlier ones.
    pub fn insert(&mut self, anime: Anime) {
        let slug = anime.slug().to_string();
        if self.entries.insert(slug.clone(), anime).is_none() {
            self.order.push(slug);
        }
    }

    /// Point lookup by slug. No partial or fuzzy matching.
    pub fn by_slug(&self, slug: &str) -> Option<&Anime> {
        self.entries.get(slug)
    }

    /// Returns the listing view of every entry, in load order.
    pub fn summaries(&self) -> Vec<AnimeSummary> {
        self.order
            .iter()
            .filter_map(|slug| self.entries.get(slug))
            .map(|anime| anime.summary().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
