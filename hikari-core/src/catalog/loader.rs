//! One-shot catalog loader.
//!
//! Reads the catalog document from the first existing candidate path and
//! builds the slug index. Every failure mode is recoverable: the loader
//! always returns an index (possibly empty) together with a report, and
//! the process keeps serving whatever was successfully parsed.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{Anime, CatalogIndex};

/// File name probed in the install directory and the working directory.
pub const CATALOG_FILE_NAME: &str = "animes.json";

/// Outcome of the single load pass, surfaced by the diagnostics endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// Every record with seasons parsed cleanly
    Ok,
    /// No candidate path exists
    FileMissing,
    /// A candidate exists but could not be read
    Unreadable,
    /// The document is not a valid JSON array
    Malformed,
    /// At least one record with seasons failed validation; the rest were kept
    SchemaViolation,
}

/// Load outcome: status, optional error detail, and the number of entries
/// that made it into the index.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub status: LoadStatus,
    pub detail: Option<String>,
    pub entries: usize,
}

impl LoadReport {
    fn ok(entries: usize) -> Self {
        Self {
            status: LoadStatus::Ok,
            detail: None,
            entries,
        }
    }

    fn failed(status: LoadStatus, detail: String) -> Self {
        Self {
            status,
            detail: Some(detail),
            entries: 0,
        }
    }
}

/// Builds the ordered candidate path list: explicit override first, then
/// the executable's directory, then the current working directory.
pub fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(path) = explicit {
        candidates.push(path.to_path_buf());
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.join(CATALOG_FILE_NAME));
        }
    }
    candidates.push(PathBuf::from(CATALOG_FILE_NAME));
    candidates
}

/// Loads the catalog from the first existing candidate path.
///
/// Records without a `seasons` key, or with an empty `seasons` array, are
/// placeholder entries and are dropped silently. A record that has seasons
/// but fails validation degrades the report to `SchemaViolation` while the
/// remaining records are kept.
pub fn load_catalog(candidates: &[PathBuf]) -> (CatalogIndex, LoadReport) {
    let Some(path) = candidates.iter().find(|path| path.exists()) else {
        warn!("no catalog file found among {} candidates", candidates.len());
        return (
            CatalogIndex::new(),
            LoadReport::failed(
                LoadStatus::FileMissing,
                format!("no catalog file among {} candidate paths", candidates.len()),
            ),
        );
    };

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            warn!("catalog file {} unreadable: {error}", path.display());
            return (
                CatalogIndex::new(),
                LoadReport::failed(LoadStatus::Unreadable, error.to_string()),
            );
        }
    };

    let records: Vec<Value> = match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(error) => {
            warn!("catalog file {} malformed: {error}", path.display());
            return (
                CatalogIndex::new(),
                LoadReport::failed(LoadStatus::Malformed, error.to_string()),
            );
        }
    };

    let mut index = CatalogIndex::new();
    let mut violation: Option<String> = None;

    for (position, record) in records.into_iter().enumerate() {
        match record.get("seasons") {
            None => {
                debug!("record {position} has no seasons, skipping");
                continue;
            }
            Some(Value::Array(seasons)) if seasons.is_empty() => {
                debug!("record {position} has zero seasons, skipping");
                continue;
            }
            Some(_) => {}
        }

        match serde_json::from_value::<Anime>(record) {
            Ok(anime) => index.insert(anime),
            Err(error) => {
                warn!("record {position} rejected: {error}");
                violation = Some(format!("record {position}: {error}"));
            }
        }
    }

    let report = match violation {
        Some(detail) => LoadReport {
            status: LoadStatus::SchemaViolation,
            detail: Some(detail),
            entries: index.len(),
        },
        None => LoadReport::ok(index.len()),
    };

    info!(
        "catalog loaded from {}: {} titles, status {:?}",
        path.display(),
        report.entries,
        report.status
    );
    (index, report)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_catalog(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join(CATALOG_FILE_NAME);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn record(slug: &str) -> String {
        format!(
            r#"{{
                "id": "1", "title": "{slug}", "slug": "{slug}",
                "release": "2024", "imdb_rating": "8.0", "time": "24m",
                "genre": "Action", "genres": ["Action"],
                "image": "", "cover_url": "", "details": {{}}, "synopsis": "",
                "seasons": [{{"season_name": "Season 1", "episodes": []}}]
            }}"#
        )
    }

    #[test]
    fn test_load_valid_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(&dir, &format!("[{},{}]", record("alpha"), record("beta")));

        let (index, report) = load_catalog(&[path]);

        assert_eq!(report.status, LoadStatus::Ok);
        assert_eq!(report.entries, 2);
        assert!(report.detail.is_none());
        assert!(index.by_slug("alpha").is_some());
    }

    #[test]
    fn test_missing_file_degrades_to_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let (index, report) = load_catalog(&[dir.path().join("nope.json")]);

        assert_eq!(report.status, LoadStatus::FileMissing);
        assert_eq!(report.entries, 0);
        assert!(index.is_empty());
    }

    #[test]
    fn test_malformed_document_degrades_to_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(&dir, "[{not json");

        let (index, report) = load_catalog(&[path]);

        assert_eq!(report.status, LoadStatus::Malformed);
        assert!(report.detail.is_some());
        assert!(index.is_empty());
    }

    #[test]
    fn test_records_without_seasons_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let document = format!(
            r#"[{}, {{"id": "2", "title": "stub", "slug": "stub"}},
                {{"id": "3", "title": "empty", "slug": "empty", "seasons": []}}]"#,
            record("alpha")
        );
        let path = write_catalog(&dir, &document);

        let (index, report) = load_catalog(&[path]);

        // Placeholder records are not errors
        assert_eq!(report.status, LoadStatus::Ok);
        assert_eq!(report.entries, 1);
        assert!(index.by_slug("stub").is_none());
        assert!(index.by_slug("empty").is_none());
    }

    #[test]
    fn test_schema_violation_keeps_valid_records() {
        let dir = tempfile::tempdir().unwrap();
        let document = format!(
            r#"[{}, {{"slug": "broken", "seasons": [{{"season_name": "S1", "episodes": []}}]}}]"#,
            record("alpha")
        );
        let path = write_catalog(&dir, &document);

        let (index, report) = load_catalog(&[path]);

        assert_eq!(report.status, LoadStatus::SchemaViolation);
        assert_eq!(report.entries, 1);
        assert!(report.detail.unwrap().contains("record 1"));
        assert!(index.by_slug("alpha").is_some());
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(&dir, &format!("[{}]", record("alpha")));
        let missing = dir.path().join("missing.json");

        let (index, _) = load_catalog(&[missing, path]);
        assert_eq!(index.len(), 1);
    }
}
