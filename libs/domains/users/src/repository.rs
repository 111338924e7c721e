use async_trait::async_trait;
use database::Context;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
///
/// Every call takes a [`Context`]; a cancelled or expired context yields
/// [`UserError::Cancelled`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user; `AlreadyExists` if the id is taken
    async fn create(&self, ctx: &Context, user: &User) -> UserResult<()>;

    /// Get a user by ID; `NotFound` if absent
    async fn find_by_id(&self, ctx: &Context, id: &str) -> UserResult<User>;

    /// Replace a stored user wholesale; `NotFound` if absent
    ///
    /// Backends may refresh `updated_at` on `user` before writing, so the
    /// caller's copy always equals the stored one afterwards.
    async fn update(&self, ctx: &Context, user: &mut User) -> UserResult<()>;

    /// Delete a user by ID; `NotFound` if absent
    async fn delete(&self, ctx: &Context, id: &str) -> UserResult<()>;
}

/// In-memory implementation of UserRepository
///
/// Clones share the same map.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, ctx: &Context, user: &User) -> UserResult<()> {
        ctx.check()?;
        let mut users = self.users.write().await;

        if users.contains_key(user.id()) {
            return Err(UserError::AlreadyExists(user.id().to_string()));
        }

        users.insert(user.id().to_string(), user.clone());

        tracing::debug!(user_id = %user.id(), "Stored user");
        Ok(())
    }

    async fn find_by_id(&self, ctx: &Context, id: &str) -> UserResult<User> {
        ctx.check()?;
        let users = self.users.read().await;

        users
            .get(id)
            .cloned()
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    async fn update(&self, ctx: &Context, user: &mut User) -> UserResult<()> {
        ctx.check()?;
        let mut users = self.users.write().await;

        match users.get_mut(user.id()) {
            Some(stored) => {
                *stored = user.clone();
                tracing::debug!(user_id = %user.id(), "Replaced user");
                Ok(())
            }
            None => Err(UserError::NotFound(user.id().to_string())),
        }
    }

    async fn delete(&self, ctx: &Context, id: &str) -> UserResult<()> {
        ctx.check()?;
        let mut users = self.users.write().await;

        if users.remove(id).is_some() {
            tracing::debug!(user_id = %id, "Removed user");
            Ok(())
        } else {
            Err(UserError::NotFound(id.to_string()))
        }
    }
}
