//! User repository.
//!
//! Users are created at registration and read at login; nothing updates
//! or deletes them. Unique indexes on `username` and `email` carry the
//! uniqueness guarantees.

use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use serde::{Deserialize, Serialize};

use papyra_common::Result;

use crate::database::{Database, COLLECTION_USERS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    /// Argon2id PHC string; never exposed to templates or JSON.
    pub password_hash: String,
}

#[derive(Clone)]
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub fn new(db: &Database) -> Self {
        Self { collection: db.collection(COLLECTION_USERS) }
    }

    /// Creates the unique indexes; run once at startup.
    pub async fn ensure_indexes(&self) -> Result<()> {
        for field in ["username", "email"] {
            let model = IndexModel::builder()
                .keys(doc! { field: 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build();
            self.collection.create_index(model).await?;
        }
        Ok(())
    }

    pub async fn create(&self, user: &User) -> Result<()> {
        self.collection.insert_one(user).await?;
        Ok(())
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.collection.find_one(doc! { "username": username }).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_round_trips_through_bson() {
        let user = User {
            username: "ada".to_string(),
            email: "ada@example.org".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        };
        let document = mongodb::bson::to_document(&user).unwrap();
        assert_eq!(document.get_str("username").unwrap(), "ada");
        let back: User = mongodb::bson::from_document(document).unwrap();
        assert_eq!(back.email, user.email);
        assert_eq!(back.password_hash, user.password_hash);
    }
}
