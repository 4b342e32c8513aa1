//! Redis Session Store
//!
//! Sessions live in Redis as JSON payloads keyed by user id, expiring
//! via Redis TTL. `ConnectionManager` transparently reconnects, so a
//! brief Redis outage produces request-level errors instead of a dead
//! process.

use std::time::Duration;

use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use kernel::id::UserId;

use crate::domain::entity::session::Session;
use crate::domain::repository::SessionStore;
use crate::error::{AuthError, AuthResult};

/// Key prefix for session records
const SESSION_KEY_PREFIX: &str = "session:";

/// Redis-backed session store
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
}

impl RedisSessionStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    fn key(user_id: &UserId) -> String {
        format!("{}{}", SESSION_KEY_PREFIX, user_id)
    }
}

impl SessionStore for RedisSessionStore {
    async fn put(&self, session: &Session, ttl: Duration) -> AuthResult<()> {
        let payload = serde_json::to_string(session)
            .map_err(|e| AuthError::Internal(format!("Session serialization failed: {}", e)))?;

        // SETEX replaces any existing session and restarts the TTL
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(Self::key(&session.user_id), payload, ttl.as_secs())
            .await?;

        Ok(())
    }

    async fn get(&self, user_id: &UserId) -> AuthResult<Option<Session>> {
        let mut conn = self.conn.clone();
        let payload: Option<String> = conn.get(Self::key(user_id)).await?;

        match payload {
            Some(json) => {
                // A corrupt record is a server fault, not a missing
                // session - reporting None here would silently log the
                // user out
                let session = serde_json::from_str(&json).map_err(|e| {
                    AuthError::Internal(format!("Corrupt session payload: {}", e))
                })?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<()> {
        let mut conn = self.conn.clone();
        // DEL of a missing key is a no-op, which keeps logout idempotent
        conn.del::<_, ()>(Self::key(user_id)).await?;

        Ok(())
    }
}
