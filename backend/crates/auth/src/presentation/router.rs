//! Auth Routers

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::Router;

use crate::domain::repository::{SessionStore, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{deserialize_user, require_user};

/// Create the auth router (/register, /login, /refresh, /logout)
pub fn auth_router<U, S>(state: AuthAppState<U, S>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    // Layers run outermost-last: deserialize_user first, then require_user
    let protected = Router::new()
        .route("/logout", get(handlers::logout::<U, S>))
        .route_layer(from_fn(require_user))
        .route_layer(from_fn_with_state(state.clone(), deserialize_user::<U, S>));

    Router::new()
        .route("/register", post(handlers::register::<U, S>))
        .route("/login", post(handlers::login::<U, S>))
        .route("/refresh", get(handlers::refresh::<U, S>))
        .merge(protected)
        .with_state(state)
}

/// Create the users router (/me)
pub fn users_router<U, S>(state: AuthAppState<U, S>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    Router::new()
        .route("/me", get(handlers::current_user))
        .route_layer(from_fn(require_user))
        .route_layer(from_fn_with_state(state.clone(), deserialize_user::<U, S>))
        .with_state(state)
}
