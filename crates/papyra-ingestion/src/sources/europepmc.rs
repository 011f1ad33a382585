//! Europe PMC REST API client.
//!
//! Endpoint: https://www.ebi.ac.uk/europepmc/webservices/rest/search

use async_trait::async_trait;
use tracing::{debug, instrument};

use papyra_common::article::{Article, ArticleSource, NO_TITLE};
use papyra_common::http::ApiClient;

use super::LiteratureSource;

const EPMC_SEARCH_URL: &str = "https://www.ebi.ac.uk/europepmc/webservices/rest/search";

pub struct EuropePmcClient {
    client: ApiClient,
    base_url: String,
}

impl EuropePmcClient {
    pub fn new() -> Self {
        Self {
            client: ApiClient::new().unwrap(),
            base_url: EPMC_SEARCH_URL.to_string(),
        }
    }

    /// Points the client at a different endpoint (tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for EuropePmcClient {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl LiteratureSource for EuropePmcClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<Article>> {
        let params = [
            ("query", query),
            ("format", "json"),
            ("pageSize", &max_results.to_string()),
        ];

        let resp = self.client
            .get(&self.base_url)?
            .query(&params)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Ok(vec![]);
        }

        let body: serde_json::Value = resp.json().await?;
        let results = body["resultList"]["result"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        debug!(count = results.len(), "Europe PMC search returned results");

        Ok(results.iter().map(article_from_result).collect())
    }
}

fn article_from_result(r: &serde_json::Value) -> Article {
    let title = r["title"].as_str().unwrap_or(NO_TITLE).to_string();

    // Records without an abstract get a composed description line so the
    // enrichment step still has something to summarize.
    let content = match r["abstractText"].as_str().filter(|s| !s.is_empty()) {
        Some(abstract_text) => abstract_text.to_string(),
        None => format!(
            "Title: {}. Authors: {}. Journal: {} ({}).",
            title,
            r["authorString"].as_str().unwrap_or("No authors available"),
            r["journalTitle"].as_str().unwrap_or("No journal available"),
            r["pubYear"].as_str().unwrap_or("No year available"),
        ),
    };

    let mut article = Article::raw(ArticleSource::EuropePmc, title, content);
    article.doi = Some(r["doi"].as_str().unwrap_or("NAN").to_string());
    article
}
