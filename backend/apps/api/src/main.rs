//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use axum::{
    http,
    http::{header, Method},
    Json, Router,
};
use redis::aio::ConnectionManager;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth::middleware::{deserialize_user, require_user};
use auth::{auth_router, users_router, AuthAppState, AuthConfig, PgUserRepository, RedisSessionStore};
use collections::presentation::handlers::CollectionsAppState;
use collections::{collections_router, PgCollectionRepository};
use platform::token::{JwtCodec, TokenKeypair};

/// Delay between Redis connection attempts
const REDIS_RETRY_DELAY: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,collections=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Session store connection; retried with a fixed delay until it
    // comes up, and the manager reconnects on its own afterwards
    let redis_url = env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
    let sessions = connect_redis(&redis_url).await;

    tracing::info!("Connected to session store");

    // Token keypairs (base64-wrapped PEM from the environment)
    let codec = load_jwt_codec()?;

    // Auth configuration; Secure cookies only in production
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
    let mut auth_config = auth_config_for_env(&app_env);
    auth_config.access_token_ttl = env_minutes("ACCESS_TOKEN_EXPIRES_IN", 15);
    auth_config.refresh_token_ttl = env_minutes("REFRESH_TOKEN_EXPIRES_IN", 59);

    let auth_state = AuthAppState {
        users: Arc::new(PgUserRepository::new(pool.clone())),
        sessions: Arc::new(RedisSessionStore::new(sessions)),
        codec: Arc::new(codec),
        config: Arc::new(auth_config),
    };

    let collections_state = CollectionsAppState {
        repo: Arc::new(PgCollectionRepository::new(pool.clone())),
    };

    // Collections sit entirely behind the identity middleware
    let collections = collections_router(collections_state)
        .layer(from_fn(require_user))
        .layer(from_fn_with_state(
            auth_state.clone(),
            deserialize_user::<PgUserRepository, RedisSessionStore>,
        ));

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .route("/api/healthchecker", get(health_check))
        .nest("/api/auth", auth_router(auth_state.clone()))
        .nest("/api/users", users_router(auth_state))
        .nest("/api/collections", collections)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// GET /api/healthchecker
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "success",
        "message": "Server is running"
    }))
}

/// Connect to Redis, retrying with a fixed delay until it succeeds
async fn connect_redis(redis_url: &str) -> ConnectionManager {
    let client = loop {
        match redis::Client::open(redis_url) {
            Ok(client) => break client,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid Redis URL, retrying");
                tokio::time::sleep(REDIS_RETRY_DELAY).await;
            }
        }
    };

    loop {
        match ConnectionManager::new(client.clone()).await {
            Ok(manager) => return manager,
            Err(e) => {
                tracing::warn!(error = %e, "Session store unreachable, retrying");
                tokio::time::sleep(REDIS_RETRY_DELAY).await;
            }
        }
    }
}

/// Load the access and refresh RS256 keypairs from the environment
fn load_jwt_codec() -> anyhow::Result<JwtCodec> {
    let access = TokenKeypair::from_base64_pem(
        &required_env("ACCESS_TOKEN_PRIVATE_KEY")?,
        &required_env("ACCESS_TOKEN_PUBLIC_KEY")?,
    )
    .map_err(|e| anyhow::anyhow!("Invalid access token keypair: {}", e))?;

    let refresh = TokenKeypair::from_base64_pem(
        &required_env("REFRESH_TOKEN_PRIVATE_KEY")?,
        &required_env("REFRESH_TOKEN_PUBLIC_KEY")?,
    )
    .map_err(|e| anyhow::anyhow!("Invalid refresh token keypair: {}", e))?;

    Ok(JwtCodec::new(access, refresh))
}

fn required_env(name: &str) -> anyhow::Result<String> {
    env::var(name).map_err(|_| anyhow::anyhow!("{} must be set in environment", name))
}

/// Pick the cookie policy from the runtime environment name, so a
/// release build on a dev host still serves insecure cookies
fn auth_config_for_env(app_env: &str) -> AuthConfig {
    if app_env.eq_ignore_ascii_case("production") {
        AuthConfig::default()
    } else {
        AuthConfig::development()
    }
}

/// Read a duration in minutes from the environment, with a default
fn env_minutes(name: &str, default_minutes: u64) -> Duration {
    let minutes = env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default_minutes);
    Duration::from_secs(minutes * 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_policy_follows_runtime_env() {
        assert!(auth_config_for_env("production").cookie_secure);
        assert!(auth_config_for_env("PRODUCTION").cookie_secure);
        assert!(!auth_config_for_env("development").cookie_secure);
        assert!(!auth_config_for_env("staging").cookie_secure);
        assert!(!auth_config_for_env("").cookie_secure);
    }
}
