//! User Entity
//!
//! Account aggregate: identity, credentials, and profile fields.
//! The password hash never leaves this entity - responses and the
//! session store only ever see the [`PublicUser`] projection.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{Email, UserRole, Username};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Display name
    pub name: Username,
    /// Login identifier (unique, normalized)
    pub email: Email,
    /// Argon2id password hash (PHC string)
    pub password: HashedPassword,
    /// Role (User, Admin)
    pub role: UserRole,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with default role
    pub fn new(name: Username, email: Email, password: HashedPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            password,
            role: UserRole::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Project into the credential-free view used by responses and
    /// the session store
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.user_id,
            name: self.name.as_str().to_string(),
            email: self.email.as_str().to_string(),
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// User projection without credentials
///
/// Serialized into the Redis session payload and returned by the
/// profile endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let password = platform::password::ClearTextPassword::new("password123".to_string())
            .unwrap()
            .hash(None)
            .unwrap();
        User::new(
            Username::new("Tom").unwrap(),
            Email::new("tom@mail.com").unwrap(),
            password,
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = sample_user();
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_public_projection_has_no_credentials() {
        let user = sample_user();
        let public = user.public();
        assert_eq!(public.id, user.user_id);
        assert_eq!(public.email, "tom@mail.com");

        // The serialized form must not carry the hash
        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password"));
    }
}
