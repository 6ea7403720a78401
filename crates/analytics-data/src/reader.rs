//! JSON export loading.
//!
//! Reads exported post arrays, validates every element into a typed
//! [`RawPost`], derives the [`StoredPost`] and inserts it, one document per
//! post and in file order.

use std::path::{Path, PathBuf};

use analytics_core::models::{RawPost, StoredPost};
use analytics_core::{AnalyticsError, Result};
use tracing::{debug, info, warn};

use crate::store::PostStore;

// ── Public API ────────────────────────────────────────────────────────────────

/// What a completed load wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub files: usize,
    pub posts: usize,
}

/// Expand directories into the `.json` files beneath them, sorted by path.
///
/// Plain paths, including ones that do not exist, are kept where they are so
/// that a missing file surfaces as a read error in its turn.
pub fn expand_input_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut expanded = Vec::with_capacity(paths.len());

    for path in paths {
        if !path.is_dir() {
            expanded.push(path.clone());
            continue;
        }

        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry.file_type().is_file()
                    && entry
                        .path()
                        .extension()
                        .map(|ext| ext == "json")
                        .unwrap_or(false)
            })
            .map(|entry| entry.into_path())
            .collect();

        if files.is_empty() {
            warn!("No JSON files found in {}", path.display());
        }
        files.sort();
        expanded.extend(files);
    }

    expanded
}

/// Read one export file and return its top-level array elements.
pub fn read_raw_posts(path: &Path) -> Result<Vec<serde_json::Value>> {
    let content = std::fs::read_to_string(path).map_err(|source| AnalyticsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| AnalyticsError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    match value {
        serde_json::Value::Array(items) => Ok(items),
        _ => Err(AnalyticsError::NotAnArray {
            path: path.to_path_buf(),
        }),
    }
}

/// Validate element `index` of `path` and derive its stored document.
pub fn parse_post(path: &Path, index: usize, value: serde_json::Value) -> Result<StoredPost> {
    let malformed = |reason: String| AnalyticsError::MalformedRecord {
        path: path.to_path_buf(),
        index,
        reason,
    };

    let raw: RawPost = serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;
    StoredPost::from_raw(raw).map_err(|e| malformed(e.to_string()))
}

/// Load every file in `paths`, in order, inserting one document per post.
///
/// The first failure stops the whole load. Documents inserted before it stay
/// in the collection, and nothing is deduplicated against earlier runs.
pub async fn store_posts<S: PostStore>(store: &S, paths: &[PathBuf]) -> Result<LoadSummary> {
    let files = expand_input_paths(paths);
    let mut summary = LoadSummary::default();

    for file_path in &files {
        let items = read_raw_posts(file_path)?;
        let records = items.len();

        for (index, item) in items.into_iter().enumerate() {
            let post = parse_post(file_path, index, item)?;
            store.insert_post(&post).await?;
            summary.posts += 1;
        }

        summary.files += 1;
        debug!("File {}: {} posts inserted", file_path.display(), records);
    }

    info!(
        "Loaded {} posts from {} files",
        summary.posts, summary.files
    );

    Ok(summary)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
