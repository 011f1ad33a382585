//! Outbound HTTP client capped to the external services Papyra composes.
//!
//! [`ApiClient`] refuses URLs outside the allowlist and applies a request
//! timeout to every call.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use url::Url;

use crate::error::PapyraError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// An allowlist-capped HTTP client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl ApiClient {
    /// Creates a client allowing the literature, LLM, and keyword APIs.
    pub fn new() -> Result<Self, PapyraError> {
        let domains = [
            "export.arxiv.org",      // arXiv query API
            "www.ebi.ac.uk",         // Europe PMC
            "ieeexploreapi.ieee.org", // IEEE Xplore
            "api.openai.com",        // chat completions
            "api.textrazor.com",     // keyword extraction
            "localhost",             // mock servers in tests
            "127.0.0.1",
        ];

        let allowlist = domains.iter().map(|d| d.to_string()).collect();

        let client = ClientBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PapyraError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Whether a URL is permitted under the current policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else { return false };
        let Some(host) = parsed.host_str() else { return false };
        self.allowlist
            .iter()
            .any(|allowed| host == allowed || host.ends_with(&format!(".{allowed}")))
    }

    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, PapyraError> {
        self.check(url)?;
        Ok(self.client.get(url))
    }

    pub fn post(&self, url: &str) -> Result<reqwest::RequestBuilder, PapyraError> {
        self.check(url)?;
        Ok(self.client.post(url))
    }

    fn check(&self, url: &str) -> Result<(), PapyraError> {
        if !self.is_allowed(url) {
            return Err(PapyraError::Policy(format!(
                "domain not in allowlist for URL {url}"
            )));
        }
        Ok(())
    }
}
