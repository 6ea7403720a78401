//! The document-store seam.
//!
//! [`PostStore`] names the handful of commands the loader and the analyzer
//! issue against the posts collection. [`crate::mongo::MongoStore`] runs them
//! against MongoDB; [`MemoryStore`] answers them from an in-process list.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use analytics_core::models::StoredPost;
use analytics_core::Result;
use serde::Deserialize;

// ── GroupCount ────────────────────────────────────────────────────────────────

/// One row of a group-and-count aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupCount<K> {
    /// The grouping key (`_id` in aggregation output).
    #[serde(rename = "_id")]
    pub key: K,
    /// Number of rows in the group.
    pub count: u64,
}

impl<K> GroupCount<K> {
    pub fn new(key: K, count: u64) -> Self {
        Self { key, count }
    }
}

// ── PostStore ─────────────────────────────────────────────────────────────────

/// Commands issued against the posts collection.
///
/// Grouping methods return rows in whatever order the store produces them;
/// callers that need an order sort the rows themselves.
pub trait PostStore {
    /// Insert one document.
    fn insert_post(&self, post: &StoredPost) -> impl Future<Output = Result<()>> + Send;

    /// Total number of documents.
    fn count_posts(&self) -> impl Future<Output = Result<u64>> + Send;

    /// Documents per `author_id`.
    fn count_by_author(&self) -> impl Future<Output = Result<Vec<GroupCount<i64>>>> + Send;

    /// Occurrences per hashtag, counting every element of every `hashtags` list.
    fn count_by_hashtag(&self) -> impl Future<Output = Result<Vec<GroupCount<String>>>> + Send;

    /// `author_name` of the first document with the given `author_id`.
    fn find_author_name(
        &self,
        author_id: i64,
    ) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Documents whose `created_at` lies in `[start, end)` by string order.
    fn count_created_between(
        &self,
        start: &str,
        end: &str,
    ) -> impl Future<Output = Result<u64>> + Send;
}

// ── MemoryStore ───────────────────────────────────────────────────────────────

/// A [`PostStore`] backed by a `Vec`, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    posts: Mutex<Vec<StoredPost>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of documents.
    pub fn with_posts(posts: Vec<StoredPost>) -> Self {
        Self {
            posts: Mutex::new(posts),
        }
    }

    /// Copy of every stored document, in insertion order.
    pub fn posts(&self) -> Vec<StoredPost> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<StoredPost>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.posts.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PostStore for MemoryStore {
    async fn insert_post(&self, post: &StoredPost) -> Result<()> {
        self.lock().push(post.clone());
        Ok(())
    }

    async fn count_posts(&self) -> Result<u64> {
        Ok(self.lock().len() as u64)
    }

    async fn count_by_author(&self) -> Result<Vec<GroupCount<i64>>> {
        let posts = self.lock();
        let mut groups: BTreeMap<i64, u64> = BTreeMap::new();
        for post in posts.iter() {
            *groups.entry(post.author_id).or_default() += 1;
        }
        Ok(groups
            .into_iter()
            .map(|(key, count)| GroupCount::new(key, count))
            .collect())
    }

    async fn count_by_hashtag(&self) -> Result<Vec<GroupCount<String>>> {
        let posts = self.lock();
        let mut groups: BTreeMap<&str, u64> = BTreeMap::new();
        for tag in posts.iter().flat_map(|p| p.hashtags.iter()) {
            *groups.entry(tag.as_str()).or_default() += 1;
        }
        Ok(groups
            .into_iter()
            .map(|(key, count)| GroupCount::new(key.to_string(), count))
            .collect())
    }

    async fn find_author_name(&self, author_id: i64) -> Result<Option<String>> {
        Ok(self
            .lock()
            .iter()
            .find(|p| p.author_id == author_id)
            .map(|p| p.author_name.clone()))
    }

    async fn count_created_between(&self, start: &str, end: &str) -> Result<u64> {
        Ok(self
            .lock()
            .iter()
            .filter(|p| p.created_at.as_str() >= start && p.created_at.as_str() < end)
            .count() as u64)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
