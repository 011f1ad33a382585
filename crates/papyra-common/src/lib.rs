//! papyra-common — shared types for the Papyra workspace.
//!
//! Holds the workspace error type, the allowlisted outbound HTTP client,
//! and the article model that flows from the literature sources through
//! enrichment into the document store.

pub mod article;
pub mod error;
pub mod http;

pub use error::{PapyraError, Result};
