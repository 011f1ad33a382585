//! Axum router mapping all URL paths to handlers.

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{
    account::{login_page, login_submit, logout, register_page, register_submit},
    chat::{chat_page, chat_submit},
    database::database_page,
    home::home,
    search::{search_page, search_submit},
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared = SharedState(Arc::new(state));

    Router::new()
        // Pages
        .route("/",         get(home))
        .route("/login",    get(login_page).post(login_submit))
        .route("/register", get(register_page).post(register_submit))
        .route("/logout",   get(logout))
        .route("/search",   get(search_page).post(search_submit))
        .route("/database", get(database_page))

        // Chat page + JSON endpoint
        .route("/chat",     get(chat_page).post(chat_submit))

        // Static files
        .nest_service("/static", ServeDir::new("static"))

        // Middleware
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared)
}
