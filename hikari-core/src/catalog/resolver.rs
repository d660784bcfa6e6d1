//! Three-level catalog navigation: anime by slug, season by position,
//! episode by identifier. Each level fails independently with a distinct
//! not-found reason, and a failure short-circuits the levels below it.

use super::{Anime, CatalogIndex, Episode, SeasonDetail};

/// Navigation failures. Every variant names the level and the identifier
/// that failed; the web layer maps all of them to 404.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("anime '{slug}' not found")]
    AnimeNotFound { slug: String },

    #[error("season {position} not found for anime '{anime}'")]
    SeasonNotFound { position: i64, anime: String },

    #[error("episode '{episode}' not found in season '{season}'")]
    EpisodeNotFound { episode: String, season: String },
}

/// Looks up an anime by exact slug.
pub fn resolve_anime<'a>(index: &'a CatalogIndex, slug: &str) -> Result<&'a Anime, ResolveError> {
    index.by_slug(slug).ok_or_else(|| ResolveError::AnimeNotFound {
        slug: slug.to_string(),
    })
}

/// Looks up a season by 1-based external position.
pub fn resolve_season(anime: &Anime, position: i64) -> Result<&SeasonDetail, ResolveError> {
    let not_found = || ResolveError::SeasonNotFound {
        position,
        anime: anime.title().to_string(),
    };
    if position < 1 {
        return Err(not_found());
    }
    anime
        .seasons
        .get((position - 1) as usize)
        .ok_or_else(not_found)
}

/// Looks up an episode by exact identifier string. "01" and "1" are
/// distinct identifiers; no numeric comparison.
pub fn resolve_episode<'a>(
    season: &'a SeasonDetail,
    episode_id: &str,
) -> Result<&'a Episode, ResolveError> {
    season
        .episodes
        .iter()
        .find(|episode| episode.episode_number == episode_id)
        .ok_or_else(|| ResolveError::EpisodeNotFound {
            episode: episode_id.to_string(),
            season: season.season_name.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AnimeSummary;

    fn demo_anime() -> Anime {
        Anime {
            summary: AnimeSummary {
                id: "1".to_string(),
                title: "Demo".to_string(),
                slug: "demo".to_string(),
                release: "2024".to_string(),
                imdb_rating: "8.0".to_string(),
                time: "24m".to_string(),
            },
            genre: "Action".to_string(),
            genres: vec!["Action".to_string()],
            image: String::new(),
            cover_url: String::new(),
            details: serde_json::Map::new(),
            synopsis: String::new(),
            seasons: vec![
                SeasonDetail {
                    season_name: "Season 1".to_string(),
                    episodes: vec![
                        Episode {
                            episode_number: "01".to_string(),
                            title: "First".to_string(),
                            player_urls: vec!["http://x/1.ts".to_string()],
                        },
                        Episode {
                            episode_number: "02".to_string(),
                            title: "Second".to_string(),
                            player_urls: Vec::new(),
                        },
                    ],
                },
                SeasonDetail {
                    season_name: "Season 2".to_string(),
                    episodes: Vec::new(),
                },
            ],
        }
    }

    #[test]
    fn test_anime_lookup() {
        let mut index = CatalogIndex::new();
        index.insert(demo_anime());

        assert!(resolve_anime(&index, "demo").is_ok());
        assert_eq!(
            resolve_anime(&index, "missing"),
            Err(ResolveError::AnimeNotFound {
                slug: "missing".to_string()
            })
        );
    }

    #[test]
    fn test_season_position_is_one_based() {
        let anime = demo_anime();

        assert_eq!(
            resolve_season(&anime, 1).unwrap().season_name,
            "Season 1"
        );
        assert_eq!(
            resolve_season(&anime, 2).unwrap().season_name,
            "Season 2"
        );
        assert!(resolve_season(&anime, 0).is_err());
        assert!(resolve_season(&anime, -1).is_err());
        assert!(resolve_season(&anime, 3).is_err());
    }

    #[test]
    fn test_season_error_names_position_and_title() {
        let anime = demo_anime();
        let error = resolve_season(&anime, 5).unwrap_err();
        assert_eq!(error.to_string(), "season 5 not found for anime 'Demo'");
    }

    #[test]
    fn test_episode_match_is_exact_string() {
        let anime = demo_anime();
        let season = resolve_season(&anime, 1).unwrap();

        assert_eq!(resolve_episode(season, "01").unwrap().title, "First");
        // "1" does not match "01"
        assert_eq!(
            resolve_episode(season, "1"),
            Err(ResolveError::EpisodeNotFound {
                episode: "1".to_string(),
                season: "Season 1".to_string()
            })
        );
    }
}
