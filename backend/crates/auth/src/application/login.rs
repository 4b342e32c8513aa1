//! Login Use Case
//!
//! Verifies credentials, opens a Redis session, and mints the access
//! and refresh token pair. Every credential failure collapses into
//! `AuthError::InvalidCredentials` so callers cannot probe which
//! emails are registered.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use platform::token::{JwtCodec, TokenKind};

use crate::application::config::AuthConfig;
use crate::domain::entity::session::Session;
use crate::domain::entity::user::PublicUser;
use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::value_object::Email;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub access_token: String,
    pub refresh_token: String,
    pub user: PublicUser,
}

/// Login use case
pub struct LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    user_repo: Arc<U>,
    sessions: Arc<S>,
    codec: Arc<JwtCodec>,
    config: Arc<AuthConfig>,
}

impl<U, S> LoginUseCase<U, S>
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

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // A malformed email or password cannot match any account
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let hash = user.password.clone();
        let pepper = self.config.password_pepper.clone();
        let verified =
            tokio::task::spawn_blocking(move || hash.verify(&password, pepper.as_deref()))
                .await
                .map_err(|e| AuthError::Internal(e.to_string()))?;

        if !verified {
            return Err(AuthError::InvalidCredentials);
        }

        // Last login wins: an existing session is overwritten and its
        // TTL starts over
        let public = user.public();
        let session = Session::open(public.clone());
        self.sessions.put(&session, self.config.session_ttl).await?;

        let subject = user.user_id.to_string();
        let access_token =
            self.codec
                .sign(TokenKind::Access, &subject, self.config.access_token_ttl)?;
        let refresh_token =
            self.codec
                .sign(TokenKind::Refresh, &subject, self.config.refresh_token_ttl)?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput {
            access_token,
            refresh_token,
            user: public,
        })
    }
}
