//! Register Use Case
//!
//! Creates a new user account. No tokens or session are issued here;
//! the caller must log in afterwards.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{PublicUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, Username};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<PublicUser> {
        let name =
            Username::new(input.name).map_err(|e| AuthError::Validation(e.to_string()))?;
        let email = Email::new(input.email).map_err(|e| AuthError::Validation(e.to_string()))?;
        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        // Fast path; the unique index on email still catches races
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::DuplicateUser);
        }

        // Argon2id is deliberately slow, keep it off the async workers
        let pepper = self.config.password_pepper.clone();
        let password_hash =
            tokio::task::spawn_blocking(move || password.hash(pepper.as_deref()))
                .await
                .map_err(|e| AuthError::Internal(e.to_string()))??;

        let user = User::new(name, email, password_hash);
        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            email = %user.email,
            "User registered"
        );

        Ok(user.public())
    }
}
