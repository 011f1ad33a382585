//! papyra-db — MongoDB access layer.
//!
//! One [`database::Database`] handle per process, with a repository per
//! collection: `articles` (enriched article records, schemaless) and
//! `users` (credentials, unique-indexed).

pub mod articles;
pub mod database;
pub mod users;

pub use articles::ArticleRepository;
pub use database::Database;
pub use users::{User, UserRepository};
