//! Query keyword extraction.
//!
//! A research question becomes a percent-joined keyword string before it
//! reaches the literature APIs. When a TextRazor key is configured the
//! question first goes through entity extraction; otherwise (or on any
//! failure) the words of the question are used directly.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use papyra_common::http::ApiClient;
use papyra_common::Result;

/// Lowercases, de-duplicates (keeping first occurrence), and joins the
/// words of `input` with `%20`, the form the query APIs receive.
pub fn normalize(input: &str) -> String {
    let mut seen = Vec::new();
    for word in input.split_whitespace() {
        let lower = word.to_lowercase();
        if !seen.contains(&lower) {
            seen.push(lower);
        }
    }
    seen.join("%20")
}

const TEXTRAZOR_URL: &str = "https://api.textrazor.com/";

/// TextRazor entity-extraction client.
pub struct TextRazorClient {
    client: ApiClient,
    base_url: String,
    api_key: SecretString,
}

impl TextRazorClient {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            client: ApiClient::new().unwrap(),
            base_url: TEXTRAZOR_URL.to_string(),
            api_key,
        }
    }

    /// Points the client at a different endpoint (tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Extracts entity identifiers from `text` and returns them as a
    /// normalized keyword string. An empty entity list yields an empty
    /// string; the caller falls back to [`normalize`].
    #[instrument(skip(self, text))]
    pub async fn extract_keywords(&self, text: &str) -> Result<String> {
        let resp = self.client
            .post(&self.base_url)?
            .header("x-textrazor-key", self.api_key.expose_secret())
            .form(&[("text", text), ("extractors", "entities")])
            .send()
            .await?;

        let body: serde_json::Value = resp.json().await?;
        let entities = body["response"]["entities"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let joined = entities
            .iter()
            .filter_map(|e| e["entityEnglishId"].as_str())
            .filter(|id| !id.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        debug!(entities = entities.len(), "TextRazor extraction complete");
        Ok(normalize(&joined))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_joins_with_percent_encoding() {
        assert_eq!(normalize("machine learning"), "machine%20learning");
    }

    #[test]
    fn normalize_lowercases_and_dedupes() {
        assert_eq!(
            normalize("Graph graph Neural NETWORKS networks"),
            "graph%20neural%20networks"
        );
    }

    #[test]
    fn normalize_of_empty_input_is_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }
}
