//! Configuration loading for Papyra.
//!
//! Non-secret settings come from `papyra.toml` (current directory, or the
//! path in `PAPYRA_CONFIG`) with serde defaults for every field. Secrets
//! are read from the environment after `.env` is loaded:
//!
//!   OPENAI_API_KEY         required — startup fails without it
//!   IEEE_API_KEY           optional — IEEE searches return nothing without it
//!   TEXTRAZOR_API_KEY      optional — keyword extraction falls back to
//!                          naive normalization
//!   MONGODB_URI            optional — defaults to a local instance
//!   PAPYRA_SESSION_SECRET  optional — a random key is generated per boot
//!                          when unset

use std::path::Path;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::info;

use papyra_common::{PapyraError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(skip)]
    pub secrets: Secrets,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_name")]
    pub name: String,
}

fn default_db_name() -> String { "research_database".to_string() }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { name: default_db_name() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String { "gpt-4".to_string() }

impl Default for LlmConfig {
    fn default() -> Self {
        Self { model: default_model() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Bounded result count requested from each literature source.
    #[serde(default = "default_max_results")]
    pub max_results_per_source: usize,
}

fn default_max_results() -> usize { 2 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_results_per_source: default_max_results() }
    }
}

/// Secrets are environment-only; they never appear in the toml layer.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    pub openai_api_key: Option<SecretString>,
    pub ieee_api_key: Option<SecretString>,
    pub textrazor_api_key: Option<SecretString>,
    pub mongodb_uri: Option<String>,
    pub session_secret: Option<SecretString>,
}

const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";

impl Config {
    /// Loads `.env`, the optional toml file, and the environment secrets.
    ///
    /// Fails when `OPENAI_API_KEY` is absent — the one startup-fatal path.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = std::env::var("PAPYRA_CONFIG").unwrap_or_else(|_| "papyra.toml".to_string());
        let mut config = if Path::new(&path).exists() {
            info!(path = %path, "Loading configuration file");
            Self::from_file(&path)?
        } else {
            Config::default()
        };

        config.secrets = Secrets {
            openai_api_key: env_secret("OPENAI_API_KEY"),
            ieee_api_key: env_secret("IEEE_API_KEY"),
            textrazor_api_key: env_secret("TEXTRAZOR_API_KEY"),
            mongodb_uri: std::env::var("MONGODB_URI").ok(),
            session_secret: env_secret("PAPYRA_SESSION_SECRET"),
        };

        if config.secrets.openai_api_key.is_none() {
            return Err(PapyraError::Config(
                "OPENAI_API_KEY is not set; refusing to start without it".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PapyraError::Config(format!("cannot read {path}: {e}")))?;
        toml::from_str(&raw).map_err(|e| PapyraError::Config(format!("invalid {path}: {e}")))
    }

    pub fn mongodb_uri(&self) -> &str {
        self.secrets.mongodb_uri.as_deref().unwrap_or(DEFAULT_MONGODB_URI)
    }
}

fn env_secret(name: &str) -> Option<SecretString> {
    std::env::var(name).ok().filter(|v| !v.is_empty()).map(SecretString::from)
}
