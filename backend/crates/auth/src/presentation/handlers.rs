//! HTTP Handlers

use axum::Json;
use axum::extract::{Form, Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use std::sync::Arc;

use kernel::id::UserId;

use crate::application::{
    AuthConfig, ConfirmationCodes, CreateUserInput, CreateUserUseCase, DeleteUserUseCase,
    IssueTokenInput, IssueTokenUseCase, ResolveSessionUseCase, SendConfirmationUseCase,
    SessionPolicy, UpdateUserInput, UpdateUserUseCase,
};
use crate::domain::mailer::Mailer;
use crate::domain::repository::{ConfirmationRepository, UserRepository};
use crate::domain::value_object::Email;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    DetailResponse, Pagination, SendEmailRequest, TokenRequest, TokenResponse, UserCreateRequest,
    UserResponse, UserUpdateRequest,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, M>
where
    R: UserRepository + ConfirmationRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<AuthConfig>,
}

/// Extract the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Extract a confirmation code header as an owned string
fn code_header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)?
        .to_str()
        .ok()
        .map(str::to_string)
}

// ============================================================================
// Login
// ============================================================================

/// POST /token
pub async fn issue_token<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Form(req): Form<TokenRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + ConfirmationRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case =
        IssueTokenUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(IssueTokenInput {
            account: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(TokenResponse {
        access_token: output.access_token,
        token_type: output.token_type,
    }))
}

// ============================================================================
// Confirmations
// ============================================================================

/// POST /sendEmail
pub async fn send_email<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<SendEmailRequest>,
) -> AuthResult<Json<DetailResponse>>
where
    R: UserRepository + ConfirmationRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let email = Email::new(req.email)
        .map_err(|e| AuthError::Validation(e.message().to_string()))?;

    let use_case = SendConfirmationUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    use_case.execute(email, req.option).await?;

    Ok(Json(DetailResponse {
        detail: "Success".to_string(),
    }))
}

// ============================================================================
// Current user
// ============================================================================

/// GET /me
pub async fn me<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + ConfirmationRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let resolver = ResolveSessionUseCase::new(state.repo.clone(), state.config.clone());
    let user = resolver
        .require(bearer_token(&headers), SessionPolicy::RequiredWithEmail)
        .await?;

    Ok(Json(UserResponse::from_user(&user)))
}

// ============================================================================
// Users
// ============================================================================

/// POST /users
pub async fn create_user<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
    Json(req): Json<UserCreateRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + ConfirmationRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    // Anonymous registration is allowed; a bad token still fails
    let resolver = ResolveSessionUseCase::new(state.repo.clone(), state.config.clone());
    let actor = resolver
        .execute(bearer_token(&headers), SessionPolicy::Optional)
        .await?;

    let use_case = CreateUserUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case
        .execute(
            actor.as_ref(),
            CreateUserInput {
                name: req.name,
                password: req.password,
                permission: req.permission,
            },
        )
        .await?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// GET /users
pub async fn list_users<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Query(page): Query<Pagination>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + ConfirmationRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let users = state.repo.list(page.skip, page.limit).await?;
    Ok(Json(users.iter().map(UserResponse::from_user).collect()))
}

/// GET /users/{user_id}
pub async fn get_user<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(user_id): Path<i64>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + ConfirmationRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let user = state
        .repo
        .find_by_id(UserId::from_i64(user_id))
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// PUT /users/{user_id}
pub async fn update_user<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(user_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<UserUpdateRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + ConfirmationRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let resolver = ResolveSessionUseCase::new(state.repo.clone(), state.config.clone());
    let actor = resolver
        .require(bearer_token(&headers), SessionPolicy::Required)
        .await?;

    let codes = ConfirmationCodes {
        email_token: code_header(&headers, "email-token"),
        email_token1: code_header(&headers, "email-token1"),
    };

    let use_case =
        UpdateUserUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(
            &actor,
            UserId::from_i64(user_id),
            UpdateUserInput {
                name: req.name,
                email: req.email,
                permission: req.permission,
                password: req.password,
            },
            codes,
        )
        .await?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// DELETE /users/{user_id}
pub async fn delete_user<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(user_id): Path<i64>,
    headers: HeaderMap,
) -> AuthResult<StatusCode>
where
    R: UserRepository + ConfirmationRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let resolver = ResolveSessionUseCase::new(state.repo.clone(), state.config.clone());
    let actor = resolver
        .require(bearer_token(&headers), SessionPolicy::Required)
        .await?;

    let use_case = DeleteUserUseCase::new(state.repo.clone());
    use_case.execute(&actor, UserId::from_i64(user_id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
