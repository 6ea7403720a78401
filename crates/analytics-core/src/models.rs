use serde::{Deserialize, Serialize};

use crate::time_utils::convert_raw_timestamp;

// ── Export records ────────────────────────────────────────────────────────────

/// One post as it appears in an exported JSON array.
///
/// Only the fields the loader needs are declared; everything else in the
/// export is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    pub id: i64,
    pub user: RawAuthor,
    pub entities: RawEntities,
    /// e.g. `"Sat Feb 14 10:30:00 +0000 2015"`.
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAuthor {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEntities {
    pub hashtags: Vec<RawHashtag>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHashtag {
    pub text: String,
}

// ── Stored documents ──────────────────────────────────────────────────────────

/// Normalised post document written to the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPost {
    pub post_id: i64,
    pub author_id: i64,
    pub author_name: String,
    /// Hashtag texts in the order they appear in the post. May be empty.
    pub hashtags: Vec<String>,
    /// UTC wall-clock time as `YYYY-MM-DD HH:MM:SS`.
    pub created_at: String,
}

impl StoredPost {
    /// Derive the stored document from an export record.
    ///
    /// Fails with [`crate::AnalyticsError::TimestampParse`] when `created_at`
    /// does not match the export format.
    pub fn from_raw(raw: RawPost) -> crate::Result<Self> {
        let created_at = convert_raw_timestamp(&raw.created_at)?;

        Ok(Self {
            post_id: raw.id,
            author_id: raw.user.id,
            author_name: raw.user.name,
            hashtags: raw.entities.hashtags.into_iter().map(|h| h.text).collect(),
            created_at,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
