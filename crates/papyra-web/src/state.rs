//! Shared application state for the web server.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use papyra_db::{ArticleRepository, UserRepository};
use papyra_ingestion::SearchPipeline;
use papyra_llm::LlmService;

/// Shared state injected into every handler.
pub struct AppState {
    pub articles: ArticleRepository,
    pub users: UserRepository,
    pub llm: LlmService,
    pub pipeline: SearchPipeline,
    /// Signing key for session cookies.
    pub cookie_key: Key,
}

#[derive(Clone)]
pub struct SharedState(pub Arc<AppState>);

impl std::ops::Deref for SharedState {
    type Target = AppState;

    fn deref(&self) -> &AppState {
        &self.0
    }
}

impl FromRef<SharedState> for Key {
    fn from_ref(state: &SharedState) -> Key {
        state.cookie_key.clone()
    }
}
