//! Refresh Use Case
//!
//! Mints a fresh access token from a still-valid refresh token. The
//! refresh token itself is not rotated; it stays valid until it
//! expires or the session is deleted.
//!
//! Every client-side failure (bad signature, expired token, missing
//! session, vanished user) collapses into `AuthError::RefreshInvalid`
//! so the response never reveals which check failed. Store errors are
//! the one exception: they surface as 500, not as a rejected refresh.

use std::sync::Arc;

use kernel::id::UserId;
use platform::token::{JwtCodec, TokenKind};

use crate::application::config::AuthConfig;
use crate::domain::repository::{SessionStore, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Refresh output
#[derive(Debug)]
pub struct RefreshOutput {
    pub access_token: String,
}

/// Refresh use case
pub struct RefreshUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    user_repo: Arc<U>,
    sessions: Arc<S>,
    codec: Arc<JwtCodec>,
    config: Arc<AuthConfig>,
}

impl<U, S> RefreshUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    pub fn new(
        user_repo: Arc<U>,
        sessions: Arc<S>,
        codec: Arc<JwtCodec>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            sessions,
            codec,
            config,
        }
    }

    pub async fn execute(&self, refresh_token: &str) -> AuthResult<RefreshOutput> {
        let claims = self
            .codec
            .verify(TokenKind::Refresh, refresh_token)
            .ok_or(AuthError::RefreshInvalid)?;

        let user_id = UserId::parse_str(&claims.sub).map_err(|_| AuthError::RefreshInvalid)?;

        // Session presence is the revocation check; logout kills
        // refresh tokens here even though their signature still holds
        let session = self
            .sessions
            .get(&user_id)
            .await?
            .ok_or(AuthError::RefreshInvalid)?;

        // The session snapshot may outlive the account itself
        let user = self
            .user_repo
            .find_by_id(&session.user_id)
            .await?
            .ok_or(AuthError::RefreshInvalid)?;

        let access_token = self.codec.sign(
            TokenKind::Access,
            &user.user_id.to_string(),
            self.config.access_token_ttl,
        )?;

        tracing::debug!(user_id = %user_id, "Access token refreshed");

        Ok(RefreshOutput { access_token })
    }
}
