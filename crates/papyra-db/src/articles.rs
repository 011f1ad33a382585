//! Article repository.

use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::Collection;
use tracing::error;

use papyra_common::article::Article;
use papyra_common::Result;

use crate::database::{Database, COLLECTION_ARTICLES};

/// Repository over the `articles` collection.
///
/// The collection is schemaless and unguarded: no uniqueness constraint,
/// no dedup, duplicate inserts for the same underlying article are
/// possible.
#[derive(Clone)]
pub struct ArticleRepository {
    collection: Collection<Article>,
}

impl ArticleRepository {
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection(COLLECTION_ARTICLES) }
    }

    pub async fn insert(&self, article: &Article) -> Result<()> {
        self.collection.insert_one(article).await?;
        Ok(())
    }

    /// Every stored record; a failed read is logged and yields an empty
    /// list rather than an error.
    pub async fn list_all(&self) -> Vec<Article> {
        let cursor = match self.collection.find(doc! {}).await {
            Ok(cursor) => cursor,
            Err(e) => {
                error!("Error retrieving articles: {e}");
                return Vec::new();
            }
        };
        match cursor.try_collect().await {
            Ok(articles) => articles,
            Err(e) => {
                error!("Error reading article cursor: {e}");
                Vec::new()
            }
        }
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }
}
