//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use std::time::Duration;

use kernel::id::UserId;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::value_object::Email;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;
}

/// Session store trait
///
/// Put with the same user id overwrites the previous session and
/// resets its TTL (last login wins). Store failures must surface as
/// errors, never as an absent session.
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Create or replace the session for a user, with TTL
    async fn put(&self, session: &Session, ttl: Duration) -> AuthResult<()>;

    /// Fetch the live session for a user, if any
    async fn get(&self, user_id: &UserId) -> AuthResult<Option<Session>>;

    /// Delete the session for a user; idempotent
    async fn delete(&self, user_id: &UserId) -> AuthResult<()>;
}
