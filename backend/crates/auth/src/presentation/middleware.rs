//! Request Identity Middleware
//!
//! Two-stage identity pipeline for protected routes:
//!
//! 1. [`deserialize_user`] - extracts a bearer/cookie access token,
//!    verifies it, confirms a live session, loads the user, and
//!    attaches a [`CurrentUser`] to the request extensions.
//! 2. [`require_user`] - rejects any request that reached a handler
//!    without a [`CurrentUser`], guarding against the first stage
//!    being accidentally left off a route.
//!
//! The response never says why verification failed; the distinction
//! between "no token" and "bad token" lives only in logs.

use axum::body::Body;
use axum::http::{header, HeaderMap, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use kernel::id::UserId;
use platform::cookie::extract_cookie;
use platform::token::TokenKind;

use crate::application::config::ACCESS_TOKEN_COOKIE;
use crate::domain::entity::user::PublicUser;
use crate::domain::repository::{SessionStore, UserRepository};
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Authenticated identity stored in request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser(pub PublicUser);

/// Pull the access token from `Authorization: Bearer` or the access
/// token cookie, in that order
fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    bearer.or_else(|| extract_cookie(headers, ACCESS_TOKEN_COOKIE))
}

/// Deserialize stage: verify the token, check the session, load the user
pub async fn deserialize_user<U, S>(
    axum::extract::State(state): axum::extract::State<AuthAppState<U, S>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let Some(token) = extract_access_token(req.headers()) else {
        tracing::debug!("Identity middleware: no access token on request");
        return Err(AuthError::Unauthenticated.into_response());
    };

    let Some(claims) = state.codec.verify(TokenKind::Access, &token) else {
        tracing::debug!("Identity middleware: access token failed verification");
        return Err(AuthError::Unauthenticated.into_response());
    };

    let user_id = match UserId::parse_str(&claims.sub) {
        Ok(id) => id,
        Err(_) => {
            tracing::debug!("Identity middleware: malformed token subject");
            return Err(AuthError::Unauthenticated.into_response());
        }
    };

    // Token signature alone is not enough; the session must still exist
    let session = match state.sessions.get(&user_id).await {
        Ok(Some(session)) => session,
        Ok(None) => return Err(AuthError::SessionExpired.into_response()),
        Err(e) => return Err(e.into_response()),
    };

    // Re-check the account; the session snapshot may be stale
    let user = match state.users.find_by_id(&session.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(AuthError::UserGone.into_response()),
        Err(e) => return Err(e.into_response()),
    };

    req.extensions_mut().insert(CurrentUser(user.public()));

    Ok(next.run(req).await)
}

/// Require stage: reject requests the deserialize stage did not vouch for
pub async fn require_user(req: Request<Body>, next: Next) -> Result<Response, Response> {
    if req.extensions().get::<CurrentUser>().is_none() {
        return Err(AuthError::Unauthenticated.into_response());
    }

    Ok(next.run(req).await)
}
