//! Contest Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use auth::application::config::AuthConfig;
use auth::domain::repository::UserRepository;
use auth::infra::postgres::PgAuthRepository;

use crate::domain::repository::ProblemRepository;
use crate::infra::postgres::PgContestRepository;
use crate::presentation::handlers::{self, ContestAppState};

/// Create the Contest router with PostgreSQL repositories
pub fn contest_router(
    repo: PgContestRepository,
    users: PgAuthRepository,
    config: AuthConfig,
) -> Router {
    contest_router_generic(repo, users, config)
}

/// Create a generic Contest router for any repository implementation
pub fn contest_router_generic<P, U>(repo: P, users: U, config: AuthConfig) -> Router
where
    P: ProblemRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let state = ContestAppState {
        repo: Arc::new(repo),
        users: Arc::new(users),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/problems",
            post(handlers::create_problem::<P, U>).get(handlers::list_problems::<P, U>),
        )
        .route(
            "/problems/{problem_id}",
            get(handlers::get_problem::<P, U>)
                .put(handlers::update_problem::<P, U>)
                .delete(handlers::delete_problem::<P, U>),
        )
        .route("/users/rank", get(handlers::get_rank::<P, U>))
        .route(
            "/users/{user_id}/problems/{problem_id}",
            post(handlers::submit_answer::<P, U>),
        )
        .with_state(state)
}
