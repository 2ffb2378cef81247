//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use std::sync::Arc;

use auth::application::{AuthConfig, ResolveSessionUseCase, SessionPolicy};
use auth::domain::repository::UserRepository;
use auth::presentation::handlers::bearer_token;
use kernel::id::{ProblemId, UserId};

use crate::application::{
    CreateProblemInput, CreateProblemUseCase, DeleteProblemUseCase, SubmitAnswerUseCase,
    UpdateProblemInput, UpdateProblemUseCase,
};
use crate::domain::policy;
use crate::domain::repository::ProblemRepository;
use crate::error::{ContestError, ContestResult};
use crate::presentation::dto::{
    AnswerRequest, AnswerResponse, Pagination, ProblemCreateRequest, ProblemResponse,
    ProblemUpdateRequest, RankEntryResponse,
};

/// Shared state for contest handlers
#[derive(Clone)]
pub struct ContestAppState<P, U>
where
    P: ProblemRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<P>,
    pub users: Arc<U>,
    pub config: Arc<AuthConfig>,
}

impl<P, U> ContestAppState<P, U>
where
    P: ProblemRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    fn resolver(&self) -> ResolveSessionUseCase<U> {
        ResolveSessionUseCase::new(self.users.clone(), self.config.clone())
    }
}

// ============================================================================
// Problems
// ============================================================================

/// POST /problems
pub async fn create_problem<P, U>(
    State(state): State<ContestAppState<P, U>>,
    headers: HeaderMap,
    Json(req): Json<ProblemCreateRequest>,
) -> ContestResult<Json<ProblemResponse>>
where
    P: ProblemRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let actor = state
        .resolver()
        .require(bearer_token(&headers), SessionPolicy::RequiredWithEmail)
        .await?;

    let use_case = CreateProblemUseCase::new(state.repo.clone());
    let problem = use_case
        .execute(
            &actor,
            CreateProblemInput {
                name: req.name,
                description: req.description,
                answer: req.answer,
                score_initial: req.score_initial,
            },
        )
        .await?;

    // The creator just supplied the answer; no point redacting it
    Ok(Json(ProblemResponse::from_problem(&problem, true)))
}

/// GET /problems
pub async fn list_problems<P, U>(
    State(state): State<ContestAppState<P, U>>,
    Query(page): Query<Pagination>,
    headers: HeaderMap,
) -> ContestResult<Json<Vec<ProblemResponse>>>
where
    P: ProblemRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let viewer = state
        .resolver()
        .execute(bearer_token(&headers), SessionPolicy::Optional)
        .await?;
    let include_answer = policy::can_view_answer(viewer.map(|u| u.tier));

    let problems = state.repo.list(page.skip, page.limit).await?;

    Ok(Json(
        problems
            .iter()
            .map(|p| ProblemResponse::from_problem(p, include_answer))
            .collect(),
    ))
}

/// GET /problems/{problem_id}
pub async fn get_problem<P, U>(
    State(state): State<ContestAppState<P, U>>,
    Path(problem_id): Path<i64>,
    headers: HeaderMap,
) -> ContestResult<Json<ProblemResponse>>
where
    P: ProblemRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let viewer = state
        .resolver()
        .execute(bearer_token(&headers), SessionPolicy::Optional)
        .await?;
    let include_answer = policy::can_view_answer(viewer.map(|u| u.tier));

    let problem = state
        .repo
        .find_by_id(ProblemId::from_i64(problem_id))
        .await?
        .ok_or(ContestError::ProblemNotFound)?;

    Ok(Json(ProblemResponse::from_problem(&problem, include_answer)))
}

/// PUT /problems/{problem_id}
pub async fn update_problem<P, U>(
    State(state): State<ContestAppState<P, U>>,
    Path(problem_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<ProblemUpdateRequest>,
) -> ContestResult<Json<ProblemResponse>>
where
    P: ProblemRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let actor = state
        .resolver()
        .require(bearer_token(&headers), SessionPolicy::RequiredWithEmail)
        .await?;

    let use_case = UpdateProblemUseCase::new(state.repo.clone());
    let problem = use_case
        .execute(
            &actor,
            ProblemId::from_i64(problem_id),
            UpdateProblemInput {
                name: req.name,
                description: req.description,
                answer: req.answer,
                score_initial: req.score_initial,
            },
        )
        .await?;

    Ok(Json(ProblemResponse::from_problem(&problem, true)))
}

/// DELETE /problems/{problem_id}
pub async fn delete_problem<P, U>(
    State(state): State<ContestAppState<P, U>>,
    Path(problem_id): Path<i64>,
    headers: HeaderMap,
) -> ContestResult<StatusCode>
where
    P: ProblemRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let actor = state
        .resolver()
        .require(bearer_token(&headers), SessionPolicy::RequiredWithEmail)
        .await?;

    let use_case = DeleteProblemUseCase::new(state.repo.clone());
    use_case
        .execute(&actor, ProblemId::from_i64(problem_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Answers
// ============================================================================

/// POST /users/{user_id}/problems/{problem_id}
pub async fn submit_answer<P, U>(
    State(state): State<ContestAppState<P, U>>,
    Path((user_id, problem_id)): Path<(i64, i64)>,
    headers: HeaderMap,
    Json(req): Json<AnswerRequest>,
) -> ContestResult<Json<AnswerResponse>>
where
    P: ProblemRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let actor = state
        .resolver()
        .require(bearer_token(&headers), SessionPolicy::Required)
        .await?;

    let use_case = SubmitAnswerUseCase::new(state.repo.clone());
    let outcome = use_case
        .execute(
            &actor,
            UserId::from_i64(user_id),
            ProblemId::from_i64(problem_id),
            &req.answer,
        )
        .await?;

    Ok(Json(AnswerResponse::from_outcome(outcome)))
}

// ============================================================================
// Rank
// ============================================================================

/// GET /users/rank
pub async fn get_rank<P, U>(
    State(state): State<ContestAppState<P, U>>,
    Query(page): Query<Pagination>,
) -> ContestResult<Json<Vec<RankEntryResponse>>>
where
    P: ProblemRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let entries = state.repo.get_rank(page.skip, page.limit).await?;

    Ok(Json(
        entries.iter().map(RankEntryResponse::from_entry).collect(),
    ))
}
