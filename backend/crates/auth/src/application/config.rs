//! Application Configuration
//!
//! Configuration for the Auth application layer: token lifetimes,
//! session TTL, and cookie policy.

use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Access token cookie name
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
/// Refresh token cookie name
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";
/// Frontend-visible login indicator cookie (not HttpOnly)
pub const LOGGED_IN_COOKIE: &str = "logged_in";

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Access token lifetime (15 minutes)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime (59 minutes)
    pub refresh_token_ttl: Duration,
    /// Redis session TTL (1 hour) - independent of token lifetimes
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_ttl: Duration::from_secs(15 * 60),
            refresh_token_ttl: Duration::from_secs(59 * 60),
            session_ttl: Duration::from_secs(3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Cookie Max-Age for the access token pair, in seconds
    pub fn access_cookie_max_age(&self) -> u64 {
        self.access_token_ttl.as_secs()
    }

    /// Cookie Max-Age for the refresh token, in seconds
    pub fn refresh_cookie_max_age(&self) -> u64 {
        self.refresh_token_ttl.as_secs()
    }
}
