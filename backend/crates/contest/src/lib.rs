//! Contest (Problems & Scoring) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, pure scoring/policy rules, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Scoring Model
//! - A problem starts at `score_initial` (a positive multiple of 10)
//! - Every distinct user's first correct answer decays the shared
//!   `score_now` by `score_initial / 10`, floored at that step value,
//!   so early solvers bank more points than late ones
//! - The solve-link insert and the decay run in one transaction; the
//!   composite primary key makes duplicate inserts lose safely

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{ContestError, ContestResult};
pub use infra::postgres::PgContestRepository;
pub use presentation::router::contest_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult, OptionExt, ResultExt},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod scoring {
    pub use crate::domain::scoring::*;
}

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgContestRepository as ContestStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
