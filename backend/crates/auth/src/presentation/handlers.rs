//! HTTP Handlers

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;

use platform::cookie::{extract_cookie, CookieConfig};
use platform::token::JwtCodec;

use crate::application::config::{
    AuthConfig, ACCESS_TOKEN_COOKIE, LOGGED_IN_COOKIE, REFRESH_TOKEN_COOKIE,
};
use crate::application::{
    LoginInput, LoginUseCase, LogoutUseCase, RefreshUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::repository::{SessionStore, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AccessTokenResponse, LoginRequest, LoginResponse, RegisterRequest, StatusResponse,
    UserResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers and middleware
pub struct AuthAppState<U, S>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    pub users: Arc<U>,
    pub sessions: Arc<S>,
    pub codec: Arc<JwtCodec>,
    pub config: Arc<AuthConfig>,
}

// Manual impl: derive(Clone) would require U: Clone and S: Clone
impl<U, S> Clone for AuthAppState<U, S>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            sessions: Arc::clone(&self.sessions),
            codec: Arc::clone(&self.codec),
            config: Arc::clone(&self.config),
        }
    }
}

// ============================================================================
// Cookie Helpers
// ============================================================================

fn access_cookie(config: &AuthConfig) -> CookieConfig {
    CookieConfig {
        name: ACCESS_TOKEN_COOKIE.to_string(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: Some(config.access_cookie_max_age() as i64),
    }
}

fn refresh_cookie(config: &AuthConfig) -> CookieConfig {
    CookieConfig {
        name: REFRESH_TOKEN_COOKIE.to_string(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: Some(config.refresh_cookie_max_age() as i64),
    }
}

/// Frontend-readable login flag; intentionally not HttpOnly so client
/// code can render a logged-in state without calling the API
fn logged_in_cookie(config: &AuthConfig) -> CookieConfig {
    CookieConfig {
        name: LOGGED_IN_COOKIE.to_string(),
        secure: config.cookie_secure,
        http_only: false,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: Some(config.access_cookie_max_age() as i64),
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<U, S>(
    State(state): State<AuthAppState<U, S>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.users.clone(), state.config.clone());

    let user = use_case
        .execute(RegisterInput {
            name: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    // No tokens on register; the client must log in
    Ok((StatusCode::ACCEPTED, Json(UserResponse::new(user))))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<U, S>(
    State(state): State<AuthAppState<U, S>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.users.clone(),
        state.sessions.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let headers = [
        (
            header::SET_COOKIE,
            access_cookie(&state.config).build_set_cookie(&output.access_token),
        ),
        (
            header::SET_COOKIE,
            refresh_cookie(&state.config).build_set_cookie(&output.refresh_token),
        ),
        (
            header::SET_COOKIE,
            logged_in_cookie(&state.config).build_set_cookie("true"),
        ),
    ];

    Ok((
        StatusCode::OK,
        axum::response::AppendHeaders(headers),
        Json(LoginResponse::new(output.access_token, output.user)),
    ))
}

// ============================================================================
// Refresh
// ============================================================================

/// GET /api/auth/refresh
pub async fn refresh<U, S>(
    State(state): State<AuthAppState<U, S>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let refresh_token =
        extract_cookie(&headers, REFRESH_TOKEN_COOKIE).ok_or(AuthError::RefreshInvalid)?;

    let use_case = RefreshUseCase::new(
        state.users.clone(),
        state.sessions.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(&refresh_token).await?;

    let set_cookies = [
        (
            header::SET_COOKIE,
            access_cookie(&state.config).build_set_cookie(&output.access_token),
        ),
        (
            header::SET_COOKIE,
            logged_in_cookie(&state.config).build_set_cookie("true"),
        ),
    ];

    Ok((
        StatusCode::OK,
        axum::response::AppendHeaders(set_cookies),
        Json(AccessTokenResponse::new(output.access_token)),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// GET /api/auth/logout (requires identity middleware)
pub async fn logout<U, S>(
    State(state): State<AuthAppState<U, S>>,
    Extension(current): Extension<CurrentUser>,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let use_case = LogoutUseCase::new(state.sessions.clone());
    use_case.execute(&current.0.id).await?;

    let set_cookies = [
        (
            header::SET_COOKIE,
            access_cookie(&state.config).build_delete_cookie(),
        ),
        (
            header::SET_COOKIE,
            refresh_cookie(&state.config).build_delete_cookie(),
        ),
        (
            header::SET_COOKIE,
            logged_in_cookie(&state.config).build_delete_cookie(),
        ),
    ];

    Ok((
        StatusCode::OK,
        axum::response::AppendHeaders(set_cookies),
        Json(StatusResponse::success()),
    ))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/users/me (requires identity middleware)
pub async fn current_user(
    Extension(current): Extension<CurrentUser>,
) -> AuthResult<Json<UserResponse>> {
    Ok(Json(UserResponse::new(current.0)))
}
