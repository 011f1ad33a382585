//! papyra-web — server-rendered front end for Papyra.
//! Provides:
//!   - Username/password registration and login (session cookies)
//!   - A search form that runs the retrieval-and-enrichment pipeline
//!   - A raw listing of the stored article collection
//!   - A JSON chat endpoint backed by the chat-completion API

pub mod auth;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
