//! API DTOs (Data Transfer Objects)

use kernel::tier::Tier;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::Purpose;

// ============================================================================
// Login
// ============================================================================

/// Form body for POST /token
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    /// Account: user name or email
    pub username: String,
    /// Password, or a 6-digit emailed code for email accounts
    pub password: String,
}

/// Response for POST /token
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

// ============================================================================
// Users
// ============================================================================

/// Request for POST /users
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreateRequest {
    pub name: String,
    pub permission: Tier,
    pub password: String,
}

/// Request for PUT /users/{user_id}; absent fields stay untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub permission: Option<Tier>,
    #[serde(default)]
    pub password: Option<String>,
}

/// User read model; never carries the password hash
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub permission: Tier,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.as_i64(),
            name: user.name.as_str().to_string(),
            email: user.email.as_ref().map(|e| e.as_str().to_string()),
            permission: user.tier,
        }
    }
}

// ============================================================================
// Confirmations
// ============================================================================

/// Request for POST /sendEmail
#[derive(Debug, Clone, Deserialize)]
pub struct SendEmailRequest {
    /// One of LOGIN, BIND, MODIFY
    pub option: Purpose,
    pub email: String,
}

/// Generic detail envelope
#[derive(Debug, Clone, Serialize)]
pub struct DetailResponse {
    pub detail: String,
}

// ============================================================================
// Pagination
// ============================================================================

fn default_limit() -> i64 {
    100
}

/// skip/limit query parameters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}
