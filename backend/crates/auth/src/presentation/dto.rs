//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::PublicUser;

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Bare success response
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self { status: "success" }
    }
}

/// Response carrying a freshly minted access token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub status: &'static str,
    pub access_token: String,
}

impl AccessTokenResponse {
    pub fn new(access_token: String) -> Self {
        Self {
            status: "success",
            access_token,
        }
    }
}

/// Login response: the access token plus the user it belongs to
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub status: &'static str,
    pub access_token: String,
    pub user: PublicUser,
}

impl LoginResponse {
    pub fn new(access_token: String, user: PublicUser) -> Self {
        Self {
            status: "success",
            access_token,
            user,
        }
    }
}

/// Response carrying a credential-free user record
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub status: &'static str,
    pub data: UserData,
}

/// User payload wrapper
#[derive(Debug, Clone, Serialize)]
pub struct UserData {
    pub user: PublicUser,
}

impl UserResponse {
    pub fn new(user: PublicUser) -> Self {
        Self {
            status: "success",
            data: UserData { user },
        }
    }
}
