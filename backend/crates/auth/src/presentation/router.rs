//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::mailer::Mailer;
use crate::domain::repository::{ConfirmationRepository, UserRepository};
use crate::infra::mailer::LogMailer;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository and log transport
pub fn auth_router(repo: PgAuthRepository, mailer: LogMailer, config: AuthConfig) -> Router {
    auth_router_generic(repo, mailer, config)
}

/// Create a generic Auth router for any repository/mailer implementation
pub fn auth_router_generic<R, M>(repo: R, mailer: M, config: AuthConfig) -> Router
where
    R: UserRepository + ConfirmationRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        config: Arc::new(config),
    };

    Router::new()
        .route("/token", post(handlers::issue_token::<R, M>))
        .route("/sendEmail", post(handlers::send_email::<R, M>))
        .route("/me", get(handlers::me::<R, M>))
        .route(
            "/users",
            post(handlers::create_user::<R, M>).get(handlers::list_users::<R, M>),
        )
        .route(
            "/users/{user_id}",
            get(handlers::get_user::<R, M>)
                .put(handlers::update_user::<R, M>)
                .delete(handlers::delete_user::<R, M>),
        )
        .with_state(state)
}
