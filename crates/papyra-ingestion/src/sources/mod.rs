//! Literature source clients.

pub mod arxiv;
pub mod europepmc;
pub mod ieee;

use async_trait::async_trait;
use papyra_common::article::Article;

/// Common interface for all literature source clients.
///
/// `search` is tolerant by contract: a non-200 response or an empty
/// result set yields `Ok(vec![])`, never an error.
#[async_trait]
pub trait LiteratureSource: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<Article>>;
}
