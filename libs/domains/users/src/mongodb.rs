//! MongoDB implementation of UserRepository
//!
//! Users share one collection with the other entity kinds. Each document is
//! keyed by the user id and tagged with `kind: "user"`; every query filters
//! on both.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database::Context;
use database::mongodb::is_duplicate_key;
use mongodb::{
    Collection, Database,
    bson::{Document, doc},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{User, next_timestamp};
use crate::repository::UserRepository;

/// Discriminator value for user documents
pub const USER_KIND: &str = "user";

/// Stored shape of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: String,
    kind: String,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            kind: USER_KIND.to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            password_hash: user.password_hash().to_string(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

impl From<UserDocument> for User {
    fn from(document: UserDocument) -> Self {
        User::reconstitute(
            document.id,
            document.name,
            document.email,
            document.password_hash,
            document.created_at,
            document.updated_at,
        )
    }
}

/// MongoDB implementation of the UserRepository
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    /// Use `collection_name` in `db` as the shared document collection
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<UserDocument>(collection_name);
        Self { collection }
    }

    fn by_id(id: &str) -> Document {
        doc! { "_id": id, "kind": USER_KIND }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, ctx, user), fields(user_id = %user.id()))]
    async fn create(&self, ctx: &Context, user: &User) -> UserResult<()> {
        let document = UserDocument::from(user);

        match ctx.run(self.collection.insert_one(&document)).await? {
            Ok(_) => {
                tracing::info!("User created");
                Ok(())
            }
            Err(e) if is_duplicate_key(&e) => Err(UserError::AlreadyExists(document.id)),
            Err(e) => Err(UserError::database("create", e)),
        }
    }

    #[instrument(skip(self, ctx))]
    async fn find_by_id(&self, ctx: &Context, id: &str) -> UserResult<User> {
        ctx.run(self.collection.find_one(Self::by_id(id)))
            .await?
            .map_err(|e| UserError::database("find_by_id", e))?
            .map(User::from)
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, ctx, user), fields(user_id = %user.id()))]
    async fn update(&self, ctx: &Context, user: &mut User) -> UserResult<()> {
        let mut document = UserDocument::from(&*user);
        document.updated_at = next_timestamp(user.updated_at());

        let result = ctx
            .run(self.collection.replace_one(Self::by_id(user.id()), &document))
            .await?
            .map_err(|e| UserError::database("update", e))?;

        if result.matched_count == 0 {
            return Err(UserError::NotFound(document.id));
        }

        user.set_updated_at(document.updated_at);
        tracing::info!("User updated");
        Ok(())
    }

    #[instrument(skip(self, ctx))]
    async fn delete(&self, ctx: &Context, id: &str) -> UserResult<()> {
        let result = ctx
            .run(self.collection.delete_one(Self::by_id(id)))
            .await?
            .map_err(|e| UserError::database("delete", e))?;

        if result.deleted_count == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        tracing::info!("User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn test_document_carries_kind_and_id() {
        let user = User::new("Alice", "alice@example.com", "secret1").unwrap();
        let document = bson::to_document(&UserDocument::from(&user)).unwrap();

        assert_eq!(document.get_str("_id").unwrap(), user.id());
        assert_eq!(document.get_str("kind").unwrap(), USER_KIND);
        assert_eq!(
            document.get_str("password_hash").unwrap(),
            user.password_hash()
        );
        assert!(!document.contains_key("id"));
    }

    #[test]
    fn test_document_round_trip_reconstitutes_user() {
        let user = User::new("Alice", "alice@example.com", "secret1").unwrap();
        let document = bson::to_document(&UserDocument::from(&user)).unwrap();

        let restored: UserDocument = bson::from_document(document).unwrap();
        let restored = User::from(restored);
        assert_eq!(restored, user);
        assert!(restored.check_password("secret1"));
    }

    #[test]
    fn test_lookup_filter_matches_kind() {
        let filter = MongoUserRepository::by_id("u1");
        assert_eq!(filter.get_str("_id").unwrap(), "u1");
        assert_eq!(filter.get_str("kind").unwrap(), USER_KIND);
    }

    #[tokio::test]
    async fn test_cancelled_context_skips_the_driver() {
        let client = mongodb::Client::with_uri_str("mongodb://127.0.0.1:1")
            .await
            .unwrap();
        let repo = MongoUserRepository::new(&client.database("test"), "documents");
        let ctx = Context::background();
        ctx.cancel();

        let result = repo.find_by_id(&ctx, "u1").await;
        assert!(matches!(result, Err(UserError::Cancelled(_))));
    }
}
