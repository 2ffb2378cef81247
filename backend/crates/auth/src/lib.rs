//! Auth (Identity & Access) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, value objects, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations, mail transport
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration with tiered permissions (root / author / member)
//! - Stateless bearer tokens (HMAC-signed claims, 30 minute TTL)
//! - Email confirmation codes gating sensitive account changes
//! - Login by password or by a fresh emailed code
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, cleartext zeroized
//! - Token validity depends only on signature and expiry; no server-side
//!   session state and no revocation list
//! - Confirmation codes are single-use within a 300 second window

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::resolve_session::{ResolveSessionUseCase, SessionPolicy};
pub use application::token::TokenService;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
