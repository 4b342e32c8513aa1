//! Session Entity
//!
//! A live session record in Redis, keyed by user id. Presence of the
//! record is the revocation authority: a token whose subject has no
//! session is dead regardless of its signature or expiry.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::PublicUser;

/// Redis session payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Subject the session belongs to
    pub user_id: UserId,
    /// Snapshot of the user at login time
    pub user: PublicUser,
    /// When this session was created (login time)
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Open a new session for a user
    pub fn open(user: PublicUser) -> Self {
        Self {
            user_id: user.id,
            user,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::UserRole;

    #[test]
    fn test_session_json_roundtrip() {
        let user = PublicUser {
            id: UserId::new(),
            name: "Tom".to_string(),
            email: "tom@mail.com".to_string(),
            role: UserRole::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let session = Session::open(user.clone());
        assert_eq!(session.user_id, user.id);

        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
