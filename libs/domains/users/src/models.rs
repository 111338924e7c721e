use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{UserError, UserResult};

/// Minimum length of a raw password, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

/// User entity
///
/// Fields are private: a `User` is either built by [`User::new`], which
/// enforces every invariant, or rebuilt from storage by
/// [`User::reconstitute`]. After that it only changes through the `update_*`
/// methods, each of which re-validates and advances `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: String,
    name: String,
    email: String,
    /// Argon2 PHC string (never exposed in serialized output)
    #[serde(skip_serializing)]
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Partial update for a user
///
/// `None` leaves the field untouched; `Some` sets it and is validated like
/// construction input.
#[derive(Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for UpdateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl User {
    /// Create a new user, validating name, email and password (in that order)
    /// and hashing the password
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: &str,
    ) -> UserResult<Self> {
        let name = name.into();
        let email = email.into();

        validate_name(&name)?;
        validate_email(&email)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::now_v7().to_string(),
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a user from trusted storage without validation
    pub fn reconstitute(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// The stored Argon2 hash, for persistence
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn update_name(&mut self, name: impl Into<String>) -> UserResult<()> {
        let name = name.into();
        validate_name(&name)?;

        self.name = name;
        self.touch();
        Ok(())
    }

    pub fn update_email(&mut self, email: impl Into<String>) -> UserResult<()> {
        let email = email.into();
        validate_email(&email)?;

        self.email = email;
        self.touch();
        Ok(())
    }

    /// Replace the password, hashing the new one
    pub fn update_password(&mut self, password: &str) -> UserResult<()> {
        validate_password(password)?;

        self.password_hash = hash_password(password)?;
        self.touch();
        Ok(())
    }

    /// Whether `candidate` matches the stored hash
    ///
    /// A stored hash that fails to parse never matches.
    pub fn check_password(&self, candidate: &str) -> bool {
        match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(user_id = %self.id, error = %e, "Stored password hash is malformed");
                false
            }
        }
    }

    /// Advance `updated_at` past its current value
    fn touch(&mut self) {
        self.updated_at = next_timestamp(self.updated_at);
    }

    pub(crate) fn set_updated_at(&mut self, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
    }
}

/// Current time, or 1µs past `previous` when the clock has not moved beyond it
pub(crate) fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

fn validate_name(name: &str) -> UserResult<()> {
    if name.is_empty() {
        return Err(UserError::Validation("name cannot be empty".to_string()));
    }
    Ok(())
}

fn validate_email(email: &str) -> UserResult<()> {
    if email.is_empty() {
        return Err(UserError::Validation("email cannot be empty".to_string()));
    }
    Ok(())
}

fn validate_password(password: &str) -> UserResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(UserError::Validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}
