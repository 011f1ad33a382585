//! papyra-ingestion — literature retrieval and the search pipeline.
//!
//! `sources` holds one client per external literature API behind the
//! [`sources::LiteratureSource`] trait; `keywords` turns a free-text
//! research question into the query string those APIs receive; `pipeline`
//! runs the one-shot retrieve → enrich → persist flow.

pub mod keywords;
pub mod pipeline;
pub mod sources;

pub use pipeline::SearchPipeline;
