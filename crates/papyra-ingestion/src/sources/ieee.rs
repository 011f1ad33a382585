//! IEEE Xplore search API client.
//!
//! Endpoint: http://ieeexploreapi.ieee.org/api/v1/search/articles
//! Requires an API key; without one the service rejects the call and the
//! search yields nothing.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use papyra_common::article::{Article, ArticleSource, NO_ABSTRACT, NO_TITLE};
use papyra_common::http::ApiClient;

use super::LiteratureSource;

const IEEE_SEARCH_URL: &str = "http://ieeexploreapi.ieee.org/api/v1/search/articles";

pub struct IeeeClient {
    client: ApiClient,
    base_url: String,
    api_key: Option<SecretString>,
}

impl IeeeClient {
    pub fn new(api_key: Option<SecretString>) -> Self {
        Self {
            client: ApiClient::new().unwrap(),
            base_url: IEEE_SEARCH_URL.to_string(),
            api_key,
        }
    }

    /// Points the client at a different endpoint (tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl LiteratureSource for IeeeClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<Article>> {
        let api_key = self
            .api_key
            .as_ref()
            .map(|k| k.expose_secret().to_string())
            .unwrap_or_default();
        let params = [
            ("apikey", api_key.as_str()),
            ("format", "json"),
            ("max_records", &max_results.to_string()),
            ("start_record", "1"),
            ("sort_order", "asc"),
            ("sort_field", "article_number"),
            ("querytext", query),
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
        let results = body["articles"].as_array().cloned().unwrap_or_default();

        debug!(count = results.len(), "IEEE Xplore search returned articles");

        Ok(results.iter().map(article_from_result).collect())
    }
}

fn article_from_result(r: &serde_json::Value) -> Article {
    // IEEE rows carry neither URL nor DOI in this record shape.
    Article::raw(
        ArticleSource::IeeeXplore,
        r["title"].as_str().unwrap_or(NO_TITLE).to_string(),
        r["abstract"].as_str().unwrap_or(NO_ABSTRACT).to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_full_record() {
        let r = serde_json::json!({"title": "Test Title", "abstract": "Test Abstract"});
        let article = article_from_result(&r);
        assert_eq!(article.source, ArticleSource::IeeeXplore);
        assert_eq!(article.title, "Test Title");
        assert_eq!(article.content, "Test Abstract");
        assert!(article.url.is_none());
        assert!(article.doi.is_none());
    }

    #[test]
    fn missing_abstract_uses_placeholder() {
        let article = article_from_result(&serde_json::json!({"title": "T"}));
        assert_eq!(article.content, NO_ABSTRACT);
    }
}
