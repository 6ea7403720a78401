//! MongoDB-backed [`PostStore`].

use analytics_core::models::StoredPost;
use analytics_core::{AnalyticsError, Result};
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Document};
use mongodb::{Client, Collection};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::store::{GroupCount, PostStore};

// ── Query documents ───────────────────────────────────────────────────────────

/// `$group` on `author_id`, one count per document.
pub fn author_counts_pipeline() -> Vec<Document> {
    vec![doc! { "$group": { "_id": "$author_id", "count": { "$sum": 1 } } }]
}

/// `$unwind` every hashtag into its own row, then `$group` on the text.
///
/// Posts with an empty `hashtags` list produce no rows.
pub fn hashtag_counts_pipeline() -> Vec<Document> {
    vec![
        doc! { "$unwind": "$hashtags" },
        doc! { "$group": { "_id": "$hashtags", "count": { "$sum": 1 } } },
    ]
}

/// Range filter over the sortable `created_at` string.
pub fn created_between_filter(start: &str, end: &str) -> Document {
    doc! { "created_at": { "$gte": start, "$lt": end } }
}

// ── MongoStore ────────────────────────────────────────────────────────────────

/// One client plus the posts collection it serves.
///
/// Owned by a single batch job; call [`MongoStore::close`] when the job ends.
pub struct MongoStore {
    client: Client,
    posts: Collection<StoredPost>,
}

impl MongoStore {
    /// Connect and ping the server, so an unreachable store fails here rather
    /// than on the first insert or query.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| AnalyticsError::Connection(e.to_string()))?;

        let db = client.database(database);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AnalyticsError::Connection(e.to_string()))?;

        info!("Connected to {}.{}", database, collection);

        Ok(Self {
            posts: db.collection(collection),
            client,
        })
    }

    /// Shut the client down, releasing its connection pool.
    pub async fn close(self) {
        self.client.shutdown().await;
        debug!("MongoDB client shut down");
    }

    async fn aggregate_counts<K: DeserializeOwned + Send>(
        &self,
        pipeline: Vec<Document>,
    ) -> Result<Vec<GroupCount<K>>> {
        let rows: Vec<Document> = self
            .posts
            .aggregate(pipeline)
            .await
            .map_err(store_error)?
            .try_collect()
            .await
            .map_err(store_error)?;

        rows.into_iter()
            .map(|row| {
                bson::from_document(row)
                    .map_err(|e| AnalyticsError::Store(format!("unexpected group row: {e}")))
            })
            .collect()
    }
}

fn store_error(e: mongodb::error::Error) -> AnalyticsError {
    AnalyticsError::Store(e.to_string())
}

impl PostStore for MongoStore {
    async fn insert_post(&self, post: &StoredPost) -> Result<()> {
        self.posts.insert_one(post).await.map_err(store_error)?;
        Ok(())
    }

    async fn count_posts(&self) -> Result<u64> {
        self.posts
            .count_documents(doc! {})
            .await
            .map_err(store_error)
    }

    async fn count_by_author(&self) -> Result<Vec<GroupCount<i64>>> {
        self.aggregate_counts(author_counts_pipeline()).await
    }

    async fn count_by_hashtag(&self) -> Result<Vec<GroupCount<String>>> {
        self.aggregate_counts(hashtag_counts_pipeline()).await
    }

    async fn find_author_name(&self, author_id: i64) -> Result<Option<String>> {
        let post = self
            .posts
            .find_one(doc! { "author_id": author_id })
            .await
            .map_err(store_error)?;
        Ok(post.map(|p| p.author_name))
    }

    async fn count_created_between(&self, start: &str, end: &str) -> Result<u64> {
        self.posts
            .count_documents(created_between_filter(start, end))
            .await
            .map_err(store_error)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
