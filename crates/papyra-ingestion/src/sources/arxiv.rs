//! arXiv query API client.
//!
//! Endpoint: http://export.arxiv.org/api/query
//! The response is an Atom feed; entries map to `{url, title, content}`.

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, instrument, warn};

use papyra_common::article::{Article, ArticleSource, NO_SUMMARY, NO_TITLE};
use papyra_common::http::ApiClient;

use super::LiteratureSource;

const ARXIV_QUERY_URL: &str = "http://export.arxiv.org/api/query";

pub struct ArxivClient {
    client: ApiClient,
    base_url: String,
}

impl ArxivClient {
    pub fn new() -> Self {
        Self {
            client: ApiClient::new().unwrap(),
            base_url: ARXIV_QUERY_URL.to_string(),
        }
    }

    /// Points the client at a different endpoint (tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for ArxivClient {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl LiteratureSource for ArxivClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<Article>> {
        // The query string is already percent-joined by the keyword step.
        let url = format!(
            "{}?search_query=all:{}&max_results={}",
            self.base_url, query, max_results
        );

        let resp = self.client.get(&url)?.send().await?;
        if !resp.status().is_success() {
            return Ok(vec![]);
        }

        let feed = resp.text().await?;
        let articles = parse_atom_feed(&feed);
        debug!(count = articles.len(), "arXiv search returned entries");
        Ok(articles)
    }
}

/// Parse an Atom feed into articles, one per `<entry>`.
///
/// Feed-level `<id>` and `<title>` elements are ignored; only text inside
/// an entry is captured.
fn parse_atom_feed(xml: &str) -> Vec<Article> {
    let mut articles = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    struct Entry {
        id: String,
        title: String,
        summary: String,
    }

    let mut current: Option<Entry> = None;
    let mut in_id      = false;
    let mut in_title   = false;
    let mut in_summary = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"entry" => {
                    current = Some(Entry {
                        id: String::new(),
                        title: String::new(),
                        summary: String::new(),
                    });
                }
                b"id"      if current.is_some() => in_id = true,
                b"title"   if current.is_some() => in_title = true,
                b"summary" if current.is_some() => in_summary = true,
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default().to_string();
                if let Some(ref mut entry) = current {
                    if in_id      { entry.id.push_str(&text); }
                    if in_title   { append_fragment(&mut entry.title, &text); }
                    if in_summary { append_fragment(&mut entry.summary, &text); }
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"id"      => in_id = false,
                b"title"   => in_title = false,
                b"summary" => in_summary = false,
                b"entry" => {
                    if let Some(entry) = current.take() {
                        let title = if entry.title.is_empty() {
                            NO_TITLE.to_string()
                        } else {
                            entry.title
                        };
                        let content = if entry.summary.is_empty() {
                            NO_SUMMARY.to_string()
                        } else {
                            entry.summary
                        };
                        let mut article = Article::raw(ArticleSource::Arxiv, title, content);
                        article.url = Some(entry.id);
                        articles.push(article);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!("Atom parse error: {e}");
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    articles
}

/// Appends text with whitespace collapsed to single spaces; arXiv wraps
/// titles and abstracts across indented lines.
fn append_fragment(target: &mut String, fragment: &str) {
    for word in fragment.split_whitespace() {
        if !target.is_empty() {
            target.push(' ');
        }
        target.push_str(word);
    }
}
