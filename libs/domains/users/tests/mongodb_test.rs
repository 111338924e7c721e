//! Integration tests for the MongoDB user repository
//!
//! These run against a real MongoDB via testcontainers and need Docker:
//! `cargo test -p domain_users -- --ignored`

use domain_users::{Context, MongoUserRepository, User, UserError, UserRepository};
use test_utils::{TestDataBuilder, TestMongo, assertions::*};

const COLLECTION: &str = "documents";

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_find_update_delete() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_user_crud");
    let repo = MongoUserRepository::new(&mongo.database(&builder.name("db", "crud")), COLLECTION);
    let ctx = Context::background();

    let mut user = User::new("Alice", builder.email("alice"), "secret1").unwrap();
    repo.create(&ctx, &user).await.unwrap();

    let fetched = repo.find_by_id(&ctx, user.id()).await.unwrap();
    assert_id_eq(fetched.id(), user.id(), "fetched user id");
    assert_eq!(fetched, user);
    assert!(fetched.check_password("secret1"));

    user.update_name("Bob").unwrap();
    let renamed_at = user.updated_at();
    repo.update(&ctx, &mut user).await.unwrap();
    assert!(user.updated_at() > renamed_at, "update refreshes updated_at");

    let fetched = repo.find_by_id(&ctx, user.id()).await.unwrap();
    assert_eq!(fetched, user);

    repo.delete(&ctx, user.id()).await.unwrap();
    assert!(matches!(
        repo.find_by_id(&ctx, user.id()).await,
        Err(UserError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_duplicate_id_is_already_exists() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_user_duplicate");
    let repo = MongoUserRepository::new(&mongo.database(&builder.name("db", "dup")), COLLECTION);
    let ctx = Context::background();

    let user = User::new("Alice", builder.email("alice"), "secret1").unwrap();
    repo.create(&ctx, &user).await.unwrap();

    let result = repo.create(&ctx, &user).await;
    assert!(matches!(result, Err(UserError::AlreadyExists(ref id)) if id == user.id()));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_unknown_ids_are_not_found() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_user_missing");
    let repo = MongoUserRepository::new(&mongo.database(&builder.name("db", "missing")), COLLECTION);
    let ctx = Context::background();

    let mut ghost = User::new("Ghost", builder.email("ghost"), "secret1").unwrap();

    assert!(matches!(
        repo.find_by_id(&ctx, ghost.id()).await,
        Err(UserError::NotFound(_))
    ));
    assert!(matches!(
        repo.update(&ctx, &mut ghost).await,
        Err(UserError::NotFound(_))
    ));
    assert!(matches!(
        repo.delete(&ctx, ghost.id()).await,
        Err(UserError::NotFound(_))
    ));
}
