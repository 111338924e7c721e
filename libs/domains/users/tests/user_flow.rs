//! End-to-end user flows against the in-memory backend

use domain_users::*;
use std::time::Duration;

#[tokio::test]
async fn test_user_lifecycle() {
    let service = UserService::new(InMemoryUserRepository::new());
    let ctx = Context::background();

    // Create
    let alice = service
        .create_user(&ctx, "Alice", "alice@example.com", "secret1")
        .await
        .unwrap();
    assert!(!alice.id().is_empty());
    assert_eq!(alice.created_at(), alice.updated_at());

    // Get
    let fetched = service.get_user(&ctx, alice.id()).await.unwrap();
    assert_eq!(fetched, alice);

    // Rename
    let input = UpdateUser {
        name: Some("Bob".to_string()),
        ..Default::default()
    };
    let bob = service.update_user(&ctx, alice.id(), input).await.unwrap();
    assert_eq!(bob.name(), "Bob");
    assert_eq!(bob.id(), alice.id());
    assert_eq!(bob.created_at(), alice.created_at());
    assert!(bob.updated_at() > bob.created_at());
    assert_eq!(service.get_user(&ctx, alice.id()).await.unwrap(), bob);

    // Delete
    service.delete_user(&ctx, alice.id()).await.unwrap();
    let result = service.get_user(&ctx, alice.id()).await;
    assert!(matches!(result, Err(UserError::NotFound(_))));
}

#[tokio::test]
async fn test_invalid_update_leaves_stored_user_untouched() {
    let service = UserService::new(InMemoryUserRepository::new());
    let ctx = Context::background();
    let alice = service
        .create_user(&ctx, "Alice", "alice@example.com", "secret1")
        .await
        .unwrap();

    let input = UpdateUser {
        name: Some(String::new()),
        ..Default::default()
    };
    let result = service.update_user(&ctx, alice.id(), input).await;
    assert!(matches!(result, Err(UserError::Validation(_))));

    assert_eq!(service.get_user(&ctx, alice.id()).await.unwrap(), alice);
}

#[tokio::test]
async fn test_short_password_is_rejected_and_nothing_stored() {
    let repository = InMemoryUserRepository::new();
    let service = UserService::new(repository.clone());

    let result = service
        .create_user(&Context::background(), "Alice", "alice@example.com", "12345")
        .await;

    assert!(matches!(result, Err(UserError::Validation(_))));
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn test_email_uniqueness_is_not_enforced() {
    let service = UserService::new(InMemoryUserRepository::new());
    let ctx = Context::background();

    let first = service
        .create_user(&ctx, "Alice", "shared@example.com", "secret1")
        .await
        .unwrap();
    let second = service
        .create_user(&ctx, "Alicia", "shared@example.com", "secret2")
        .await
        .unwrap();

    assert_ne!(first.id(), second.id());
}

#[tokio::test]
async fn test_cancelled_context_fails_every_operation() {
    let repository = InMemoryUserRepository::new();
    let service = UserService::new(repository.clone());
    let live = Context::background();
    let alice = service
        .create_user(&live, "Alice", "alice@example.com", "secret1")
        .await
        .unwrap();

    let ctx = live.child();
    ctx.cancel();

    assert!(matches!(
        service.create_user(&ctx, "Carol", "carol@example.com", "secret1").await,
        Err(UserError::Cancelled(ContextError::Cancelled))
    ));
    assert!(matches!(
        service.get_user(&ctx, alice.id()).await,
        Err(UserError::Cancelled(_))
    ));
    assert!(matches!(
        service
            .update_user(
                &ctx,
                alice.id(),
                UpdateUser {
                    name: Some("Bob".to_string()),
                    ..Default::default()
                }
            )
            .await,
        Err(UserError::Cancelled(_))
    ));
    assert!(matches!(
        service.delete_user(&ctx, alice.id()).await,
        Err(UserError::Cancelled(_))
    ));

    // Parent context is unaffected and nothing changed
    assert_eq!(repository.len().await, 1);
    assert_eq!(service.get_user(&live, alice.id()).await.unwrap(), alice);
}

#[tokio::test]
async fn test_deadline_exceeded() {
    let service = UserService::new(InMemoryUserRepository::new());
    let ctx = Context::background().with_timeout(Duration::from_millis(5));
    tokio::time::sleep(Duration::from_millis(20)).await;

    let result = service.get_user(&ctx, "anything").await;
    assert!(matches!(
        result,
        Err(UserError::Cancelled(ContextError::DeadlineExceeded))
    ));
}
