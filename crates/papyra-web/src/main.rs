//! Papyra web server.
//!
//! Run with: cargo run -p papyra-web

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use papyra_config::Config;
use papyra_db::{ArticleRepository, Database, UserRepository};
use papyra_ingestion::keywords::TextRazorClient;
use papyra_ingestion::SearchPipeline;
use papyra_llm::{LlmService, OpenAiBackend};
use papyra_web::auth::session_key;
use papyra_web::router::build_router;
use papyra_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Fails fast when OPENAI_API_KEY is missing.
    let config = Config::load()?;

    let db = Database::connect(config.mongodb_uri(), &config.database.name).await?;
    let articles = ArticleRepository::new(&db);
    let users = UserRepository::new(&db);
    if let Err(e) = users.ensure_indexes().await {
        warn!("Could not create user indexes: {e}");
    }

    let openai_key = config
        .secrets
        .openai_api_key
        .clone()
        .expect("validated by Config::load");
    let backend = OpenAiBackend::new(openai_key, config.llm.model.clone());
    let llm = LlmService::new(Arc::new(backend));

    let mut pipeline = SearchPipeline::with_default_sources(
        llm.clone(),
        Arc::new(articles.clone()),
        config.secrets.ieee_api_key.clone(),
        config.search.max_results_per_source,
    );
    if let Some(textrazor_key) = config.secrets.textrazor_api_key.clone() {
        pipeline = pipeline.with_keyword_extractor(TextRazorClient::new(textrazor_key));
    }

    let state = AppState {
        articles,
        users,
        llm,
        pipeline,
        cookie_key: session_key(config.secrets.session_secret.as_ref()),
    };

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
