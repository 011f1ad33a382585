//! MongoDB connection handle.

use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection};
use tracing::info;

use papyra_common::Result;

pub const COLLECTION_ARTICLES: &str = "articles";
pub const COLLECTION_USERS: &str = "users";

/// Shared handle to the application database.
#[derive(Clone)]
pub struct Database {
    db: mongodb::Database,
}

impl Database {
    /// Connects with the Stable API pinned to V1.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        let client = Client::with_options(options)?;
        info!(db = %db_name, "Connected to MongoDB");
        Ok(Self { db: client.database(db_name) })
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}
