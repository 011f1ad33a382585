//! One-shot retrieval-and-enrichment pipeline.
//!
//! For a single search: normalize the query into keywords, ask each
//! literature source in turn, enrich every returned article with a
//! summary and topic list, and insert each enriched record into the
//! document store. A failed source contributes nothing, a failed insert
//! is logged and swallowed; the caller always receives the full enriched
//! list. Every invocation repeats all network calls — there is no
//! caching, dedup, or pagination.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;
use tracing::{error, info, instrument, warn};

use papyra_common::article::Article;
use papyra_common::Result;
use papyra_db::ArticleRepository;
use papyra_llm::LlmService;

use crate::keywords::{self, TextRazorClient};
use crate::sources::arxiv::ArxivClient;
use crate::sources::europepmc::EuropePmcClient;
use crate::sources::ieee::IeeeClient;
use crate::sources::LiteratureSource;

/// Where enriched articles land. Split from [`ArticleRepository`] so the
/// pipeline can run against an in-memory store in tests.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn insert(&self, article: &Article) -> Result<()>;
}

#[async_trait]
impl ArticleStore for ArticleRepository {
    async fn insert(&self, article: &Article) -> Result<()> {
        ArticleRepository::insert(self, article).await
    }
}

pub struct SearchPipeline {
    sources: Vec<Box<dyn LiteratureSource>>,
    llm: LlmService,
    store: Arc<dyn ArticleStore>,
    keyword_extractor: Option<TextRazorClient>,
    max_results_per_source: usize,
}

impl SearchPipeline {
    pub fn new(
        sources: Vec<Box<dyn LiteratureSource>>,
        llm: LlmService,
        store: Arc<dyn ArticleStore>,
        max_results_per_source: usize,
    ) -> Self {
        Self {
            sources,
            llm,
            store,
            keyword_extractor: None,
            max_results_per_source,
        }
    }

    /// The standard three-source pipeline: arXiv, Europe PMC, IEEE Xplore.
    pub fn with_default_sources(
        llm: LlmService,
        store: Arc<dyn ArticleStore>,
        ieee_api_key: Option<SecretString>,
        max_results_per_source: usize,
    ) -> Self {
        let sources: Vec<Box<dyn LiteratureSource>> = vec![
            Box::new(ArxivClient::new()),
            Box::new(EuropePmcClient::new()),
            Box::new(IeeeClient::new(ieee_api_key)),
        ];
        Self::new(sources, llm, store, max_results_per_source)
    }

    pub fn with_keyword_extractor(mut self, extractor: TextRazorClient) -> Self {
        self.keyword_extractor = Some(extractor);
        self
    }

    /// Runs the full search for one query and returns the enriched
    /// articles.
    #[instrument(skip(self))]
    pub async fn run(&self, raw_query: &str) -> Vec<Article> {
        let query = self.keyword_string(raw_query).await;
        info!(keywords = %query, "Starting literature search");

        let mut articles = Vec::new();
        for source in &self.sources {
            match source.search(&query, self.max_results_per_source).await {
                Ok(found) => {
                    info!(count = found.len(), "Source search complete");
                    articles.extend(found);
                }
                Err(e) => warn!("Source search failed, skipping: {e}"),
            }
        }

        let mut enriched = Vec::with_capacity(articles.len());
        for mut article in articles {
            let (summary, topics) = self.llm.enrich(&article.content).await;
            article.summary = Some(summary);
            article.topics = topics;
            article.keywords = Some(query.clone());

            if let Err(e) = self.store.insert(&article).await {
                error!("Error inserting article: {e}");
            }
            enriched.push(article);
        }

        info!(count = enriched.len(), "Search pipeline complete");
        enriched
    }

    async fn keyword_string(&self, raw_query: &str) -> String {
        if let Some(extractor) = &self.keyword_extractor {
            match extractor.extract_keywords(raw_query).await {
                Ok(extracted) if !extracted.is_empty() => return extracted,
                Ok(_) => warn!("TextRazor found no entities, using raw query words"),
                Err(e) => warn!("TextRazor extraction failed, using raw query words: {e}"),
            }
        }
        keywords::normalize(raw_query)
    }
}
