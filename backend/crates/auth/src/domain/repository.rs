//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in the
//! infrastructure layer.

use std::time::Duration;

use kernel::id::UserId;

use crate::domain::entity::confirmation::Confirmation;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::Purpose;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user and return the stored row (with assigned id)
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>>;

    /// Find user by name
    async fn find_by_name(&self, name: &str) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;

    /// Check if a name is already registered
    async fn exists_by_name(&self, name: &str) -> AuthResult<bool>;

    /// Check if an email is already bound
    async fn exists_by_email(&self, email: &str) -> AuthResult<bool>;

    /// List users, paginated
    async fn list(&self, skip: i64, limit: i64) -> AuthResult<Vec<User>>;

    /// Persist changes to an existing user
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Delete a user; the solve-link table cascades
    async fn delete(&self, id: UserId) -> AuthResult<()>;
}

/// Confirmation ledger trait
///
/// Exactly one live row per (email, purpose): `upsert` overwrites and
/// resets the timestamp; lookups exclude rows older than the window.
#[trait_variant::make(ConfirmationRepository: Send)]
pub trait LocalConfirmationRepository {
    /// Insert or replace the row for (email, purpose)
    async fn upsert(&self, confirmation: &Confirmation) -> AuthResult<()>;

    /// Return the row only if it is younger than `window`
    async fn find_fresh(
        &self,
        email: &str,
        purpose: Purpose,
        window: Duration,
    ) -> AuthResult<Option<Confirmation>>;

    /// Remove the row (consume after successful verification)
    async fn delete(&self, email: &str, purpose: Purpose) -> AuthResult<()>;
}
