//! The three read-only queries run against a loaded collection.
//!
//! Ordering is decided here rather than by the store: ties between authors go
//! to the lowest `author_id`, ties between hashtags to the alphabetically
//! first text.

use std::cmp::Reverse;

use analytics_core::time_utils::HourWindow;
use analytics_core::Result;
use tracing::{debug, warn};

use crate::store::{GroupCount, PostStore};

// ── Result types ──────────────────────────────────────────────────────────────

/// The author with the most posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MostActiveAuthor {
    pub author_id: i64,
    pub author_name: String,
    pub posts: u64,
}

/// Output of [`PostAnalyzer::most_active_author`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorActivity {
    /// Every document in the collection.
    pub total_posts: u64,
    /// `None` only when the collection is empty.
    pub most_active: Option<MostActiveAuthor>,
}

/// Post volume for one [`HourWindow`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyCount {
    pub window: HourWindow,
    pub count: u64,
}

// ── Ordering ──────────────────────────────────────────────────────────────────

/// Highest count wins; equal counts go to the lowest author id.
pub fn pick_most_active(groups: &[GroupCount<i64>]) -> Option<&GroupCount<i64>> {
    groups
        .iter()
        .min_by_key(|g| (Reverse(g.count), g.key))
}

/// Sort hashtag groups by count descending, then by text ascending.
pub fn rank_hashtags(mut groups: Vec<GroupCount<String>>) -> Vec<GroupCount<String>> {
    groups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    groups
}

// ── PostAnalyzer ──────────────────────────────────────────────────────────────

/// Runs the report queries against one store.
pub struct PostAnalyzer<'a, S> {
    store: &'a S,
}

impl<'a, S: PostStore> PostAnalyzer<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Total document count plus the author who posted the most.
    pub async fn most_active_author(&self) -> Result<AuthorActivity> {
        let total_posts = self.store.count_posts().await?;
        let groups = self.store.count_by_author().await?;

        let Some(winner) = pick_most_active(&groups) else {
            debug!("No authors found; collection is empty");
            return Ok(AuthorActivity {
                total_posts,
                most_active: None,
            });
        };

        let author_name = match self.store.find_author_name(winner.key).await? {
            Some(name) => name,
            None => {
                warn!(
                    "No document found for author {} after grouping; reporting the id",
                    winner.key
                );
                winner.key.to_string()
            }
        };

        Ok(AuthorActivity {
            total_posts,
            most_active: Some(MostActiveAuthor {
                author_id: winner.key,
                author_name,
                posts: winner.count,
            }),
        })
    }

    /// The `limit` most used hashtags, most used first.
    pub async fn top_hashtags(&self, limit: usize) -> Result<Vec<String>> {
        let groups = self.store.count_by_hashtag().await?;
        debug!("{} distinct hashtags", groups.len());

        Ok(rank_hashtags(groups)
            .into_iter()
            .take(limit)
            .map(|g| g.key)
            .collect())
    }

    /// One count per window, in the order given.
    pub async fn hourly_volume(&self, windows: &[HourWindow]) -> Result<Vec<HourlyCount>> {
        let mut counts = Vec::with_capacity(windows.len());
        for window in windows {
            let count = self
                .store
                .count_created_between(&window.start, &window.end)
                .await?;
            counts.push(HourlyCount {
                window: window.clone(),
                count,
            });
        }
        Ok(counts)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
