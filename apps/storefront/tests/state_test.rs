//! Wiring tests for the in-memory backend

use core_config::storage::StorageBackend;
use database::Context;
use domain_products::{ProductError, UpdateProduct};
use domain_users::UserError;
use std::time::Duration;
use storefront::config::{Config, Environment};
use storefront::state::AppState;

fn memory_config() -> Config {
    Config {
        environment: Environment::Development,
        storage: StorageBackend::Memory,
        mongodb: None,
        startup_timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn test_memory_backend_wires_both_services() {
    let ctx = Context::background();
    let state = AppState::build(&ctx, memory_config()).await.unwrap();

    assert!(state.mongo_client.is_none());
    assert!(state.is_healthy(&ctx).await);

    let alice = state
        .users
        .create_user(&ctx, "Alice", "alice@example.com", "secret1")
        .await
        .unwrap();
    let widget = state
        .products
        .create_product(&ctx, alice.id(), "Widget", 1999, 5)
        .await
        .unwrap();

    let owned = state
        .products
        .get_products_by_owner(&ctx, alice.id())
        .await
        .unwrap();
    assert_eq!(owned, vec![widget.clone()]);

    let restocked = state
        .products
        .update_product(
            &ctx,
            widget.id(),
            UpdateProduct {
                stock: Some(0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(restocked.stock(), 0);
}

#[tokio::test]
async fn test_clones_share_storage() {
    let ctx = Context::background();
    let state = AppState::build(&ctx, memory_config()).await.unwrap();
    let other = state.clone();

    let alice = state
        .users
        .create_user(&ctx, "Alice", "alice@example.com", "secret1")
        .await
        .unwrap();
    assert_eq!(other.users.get_user(&ctx, alice.id()).await.unwrap(), alice);
}

#[tokio::test]
async fn test_user_deletion_does_not_cascade_to_products() {
    let ctx = Context::background();
    let state = AppState::build(&ctx, memory_config()).await.unwrap();

    let alice = state
        .users
        .create_user(&ctx, "Alice", "alice@example.com", "secret1")
        .await
        .unwrap();
    state
        .products
        .create_product(&ctx, alice.id(), "Widget", 1999, 5)
        .await
        .unwrap();

    state.users.delete_user(&ctx, alice.id()).await.unwrap();
    assert!(matches!(
        state.users.get_user(&ctx, alice.id()).await,
        Err(UserError::NotFound(_))
    ));

    let orphaned = state
        .products
        .get_products_by_owner(&ctx, alice.id())
        .await
        .unwrap();
    assert_eq!(orphaned.len(), 1);
}

#[tokio::test]
async fn test_shutdown_cancellation_reaches_services() {
    let root = Context::background();
    let state = AppState::build(&root, memory_config()).await.unwrap();

    root.cancel();

    assert!(matches!(
        state
            .products
            .create_product(&root, "owner-1", "Widget", 100, 1)
            .await,
        Err(ProductError::Cancelled(_))
    ));
    assert!(matches!(
        state.users.get_user(&root, "anything").await,
        Err(UserError::Cancelled(_))
    ));
}

#[tokio::test]
async fn test_mongodb_backend_without_settings_fails() {
    let config = Config {
        storage: StorageBackend::MongoDb,
        ..memory_config()
    };

    let result = AppState::build(&Context::background(), config).await;
    assert!(result.is_err());
}
