use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use gleif::{GleifError, LegalEntity, ReferenceReport, ReferenceSnapshot};
use serde::Serialize;

/// Document printed by `gleif-search`.
#[derive(Debug, Serialize)]
pub struct SearchOutput<'a> {
    /// Query text as given.
    pub query: &'a str,
    /// `"name"` or `"fulltext"`.
    pub search_type: &'a str,
    /// Upper-cased country filter.
    pub country_filter: Option<&'a str>,
    /// Number of results.
    pub results_count: usize,
    /// Normalized entities.
    pub results: &'a [LegalEntity],
}

/// Per-resource entry of `_summary.json`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SavedFile {
    /// Snapshot written.
    Saved {
        /// File name inside the output directory.
        filename: String,
        /// Items written.
        count: usize,
        /// Full path written.
        filepath: String,
    },
    /// Snapshot failed.
    Failed {
        /// Error message.
        error: String,
    },
}

/// Contents of `_summary.json`.
#[derive(Debug, Serialize)]
pub struct Summary {
    /// When the run finished.
    pub timestamp: DateTime<Utc>,
    /// API version the snapshots came from.
    pub api_version: &'static str,
    /// Data source label.
    pub source: &'static str,
    /// Directory the files were written to.
    pub output_directory: String,
    /// Outcome per resource, keyed by resource name.
    pub files_saved: BTreeMap<String, SavedFile>,
}

/// Write `value` as pretty JSON to `path`.
///
/// # Errors
/// Returns `GleifError::Io` on write failure and `GleifError::Data` if
/// serialization fails.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), GleifError> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text)?;
    Ok(())
}

/// Create `dir` if missing.
///
/// # Errors
/// Returns `GleifError::Io` if the directory cannot be created.
pub fn ensure_dir(dir: &Path) -> Result<(), GleifError> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        tracing::info!(dir = %dir.display(), "created output directory");
    }
    Ok(())
}

/// Write `snapshot` to `<dir>/<type>.json` and return the path.
///
/// # Errors
/// See [`write_json`].
pub fn save_snapshot(dir: &Path, snapshot: &ReferenceSnapshot) -> Result<PathBuf, GleifError> {
    let path = dir.join(format!("{}.json", snapshot.kind));
    write_json(&path, snapshot)?;
    Ok(path)
}

/// Write every snapshot of `report` plus `_summary.json` into `dir`.
///
/// A snapshot that cannot be written is recorded in the summary like a fetch
/// failure.
///
/// # Errors
/// Returns `GleifError::Io` if the directory or the summary cannot be written.
pub fn save_report(dir: &Path, report: &ReferenceReport) -> Result<Summary, GleifError> {
    ensure_dir(dir)?;
    let mut files_saved = BTreeMap::new();
    for snapshot in &report.snapshots {
        let entry = match save_snapshot(dir, snapshot) {
            Ok(path) => {
                tracing::info!(kind = %snapshot.kind, count = snapshot.count, "snapshot saved");
                SavedFile::Saved {
                    filename: format!("{}.json", snapshot.kind),
                    count: snapshot.count,
                    filepath: path.display().to_string(),
                }
            }
            Err(e) => SavedFile::Failed {
                error: e.to_string(),
            },
        };
        files_saved.insert(snapshot.kind.to_string(), entry);
    }
    for failure in &report.failures {
        tracing::error!(kind = %failure.kind, error = %failure.error, "snapshot failed");
        files_saved.insert(
            failure.kind.to_string(),
            SavedFile::Failed {
                error: failure.error.to_string(),
            },
        );
    }
    let summary = Summary {
        timestamp: Utc::now(),
        api_version: "v1",
        source: "GLEIF API",
        output_directory: dir.display().to_string(),
        files_saved,
    };
    write_json(&dir.join("_summary.json"), &summary)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gleif::{ReferenceFailure, ReferenceKind};
    use serde_json::json;

    fn snapshot(kind: ReferenceKind) -> ReferenceSnapshot {
        ReferenceSnapshot {
            timestamp: Utc::now(),
            kind,
            description: kind.description().to_string(),
            count: 1,
            items: vec![json!({ "id": "X" })],
        }
    }

    #[test]
    fn report_writes_files_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let report = ReferenceReport {
            snapshots: vec![snapshot(ReferenceKind::Countries)],
            failures: vec![ReferenceFailure {
                kind: ReferenceKind::Regions,
                error: GleifError::http(503, "http://x/regions"),
            }],
        };
        let summary = save_report(&out, &report).unwrap();

        assert!(out.join("countries.json").is_file());
        assert!(!out.join("regions.json").exists());
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("_summary.json")).unwrap()).unwrap();
        assert_eq!(written["files_saved"]["countries"]["count"], json!(1));
        assert!(written["files_saved"]["regions"]["error"].is_string());
        assert_eq!(summary.files_saved.len(), 2);
    }
}
