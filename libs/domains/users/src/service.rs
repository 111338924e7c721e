use database::Context;
use std::sync::Arc;
use tracing::instrument;

use crate::error::UserResult;
use crate::models::{UpdateUser, User};
use crate::repository::UserRepository;

/// Service layer for user operations
///
/// Holds the repository behind an `Arc`, so `R` may be a trait object
/// chosen at startup (`UserService<dyn UserRepository>`).
pub struct UserService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UserRepository + ?Sized> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self::from_shared(Arc::new(repository))
    }
}

impl<R: UserRepository + ?Sized> UserService<R> {
    /// Build on an already shared repository
    pub fn from_shared(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a new user; validation and hashing happen before storage
    #[instrument(skip(self, ctx, password))]
    pub async fn create_user(
        &self,
        ctx: &Context,
        name: &str,
        email: &str,
        password: &str,
    ) -> UserResult<User> {
        let user = User::new(name, email, password)?;
        self.repository.create(ctx, &user).await?;

        tracing::info!(user_id = %user.id(), "Created user");
        Ok(user)
    }

    /// Get a user by ID
    #[instrument(skip(self, ctx))]
    pub async fn get_user(&self, ctx: &Context, id: &str) -> UserResult<User> {
        self.repository.find_by_id(ctx, id).await
    }

    /// Apply the `Some` fields of `input` and persist the result
    ///
    /// The first invalid field aborts the update before anything is written.
    #[instrument(skip(self, ctx))]
    pub async fn update_user(&self, ctx: &Context, id: &str, input: UpdateUser) -> UserResult<User> {
        let mut user = self.repository.find_by_id(ctx, id).await?;

        if let Some(name) = input.name {
            user.update_name(name)?;
        }
        if let Some(email) = input.email {
            user.update_email(email)?;
        }
        if let Some(password) = input.password {
            user.update_password(&password)?;
        }

        self.repository.update(ctx, &mut user).await?;

        tracing::info!(user_id = %id, "Updated user");
        Ok(user)
    }

    /// Delete a user
    #[instrument(skip(self, ctx))]
    pub async fn delete_user(&self, ctx: &Context, id: &str) -> UserResult<()> {
        self.repository.delete(ctx, id).await?;

        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }

    /// Whether `password` matches the stored credential of user `id`
    #[instrument(skip(self, ctx, password))]
    pub async fn check_credentials(
        &self,
        ctx: &Context,
        id: &str,
        password: &str,
    ) -> UserResult<bool> {
        let user = self.repository.find_by_id(ctx, id).await?;
        Ok(user.check_password(password))
    }
}
