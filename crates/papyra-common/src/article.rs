//! Article model shared between ingestion, enrichment, and persistence.

use serde::{Deserialize, Serialize};

/// Default title when a source omits one.
pub const NO_TITLE: &str = "No title available";
/// arXiv placeholder when an entry carries no `<summary>`.
pub const NO_SUMMARY: &str = "No summary available";
/// IEEE Xplore placeholder when an article carries no abstract.
pub const NO_ABSTRACT: &str = "No abstract available";

/// Which external literature service an article came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArticleSource {
    #[serde(rename = "Cornell Arxiv")]
    Arxiv,
    #[serde(rename = "Europe PMC")]
    EuropePmc,
    #[serde(rename = "IEEE Xplore")]
    IeeeXplore,
}

impl ArticleSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleSource::Arxiv      => "Cornell Arxiv",
            ArticleSource::EuropePmc  => "Europe PMC",
            ArticleSource::IeeeXplore => "IEEE Xplore",
        }
    }
}

impl std::fmt::Display for ArticleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One retrieved article, before and after enrichment.
///
/// `url` (arXiv) and `doi` (Europe PMC) are source-dependent identifiers;
/// IEEE Xplore rows carry neither. `summary` and `topics` are attached by
/// the enrichment step, `keywords` by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub source: ArticleSource,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

impl Article {
    /// A raw record as a source client produces it, without enrichment.
    pub fn raw(source: ArticleSource, title: String, content: String) -> Self {
        Self {
            source,
            title,
            content,
            url: None,
            doi: None,
            summary: None,
            topics: Vec::new(),
            keywords: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_serializes_to_display_string() {
        let json = serde_json::to_value(ArticleSource::Arxiv).unwrap();
        assert_eq!(json, serde_json::json!("Cornell Arxiv"));
        let back: ArticleSource = serde_json::from_value(json).unwrap();
        assert_eq!(back, ArticleSource::Arxiv);
    }

    #[test]
    fn raw_article_skips_empty_enrichment_fields() {
        let a = Article::raw(
            ArticleSource::IeeeXplore,
            "Test Title".into(),
            "Test Abstract".into(),
        );
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["source"], "IEEE Xplore");
        assert!(json.get("summary").is_none());
        assert!(json.get("topics").is_none());
        assert!(json.get("url").is_none());
    }
}
