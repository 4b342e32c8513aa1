//! Logout Use Case
//!
//! Deletes the session record, invalidating every outstanding access
//! and refresh token for the user in one step. Idempotent: logging
//! out twice succeeds both times.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::SessionStore;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<S>
where
    S: SessionStore,
{
    sessions: Arc<S>,
}

impl<S> LogoutUseCase<S>
where
    S: SessionStore,
{
    pub fn new(sessions: Arc<S>) -> Self {
        Self { sessions }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<()> {
        self.sessions.delete(user_id).await?;

        tracing::info!(user_id = %user_id, "User logged out");

        Ok(())
    }
}
