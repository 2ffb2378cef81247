//! Submit Answer Use Case
//!
//! The answer-scoring state machine: per (user, problem) the only
//! transition is unsolved -> solved, taken on the first correct
//! submission. Wrong answers change nothing and may be retried forever;
//! repeat correct submissions stay `Accepted` without touching the
//! score.

use std::sync::Arc;

use auth::domain::entity::user::User;
use kernel::id::{ProblemId, UserId};

use crate::domain::repository::ProblemRepository;
use crate::domain::scoring::AnswerOutcome;
use crate::error::{ContestError, ContestResult};

/// Submit answer use case
pub struct SubmitAnswerUseCase<P>
where
    P: ProblemRepository,
{
    problem_repo: Arc<P>,
}

impl<P> SubmitAnswerUseCase<P>
where
    P: ProblemRepository,
{
    pub fn new(problem_repo: Arc<P>) -> Self {
        Self { problem_repo }
    }

    pub async fn execute(
        &self,
        actor: &User,
        target_user_id: UserId,
        problem_id: ProblemId,
        answer: &str,
    ) -> ContestResult<AnswerOutcome> {
        // Users submit on their own behalf only
        if actor.id != target_user_id {
            return Err(ContestError::PermissionDenied);
        }

        let problem = self
            .problem_repo
            .find_by_id(problem_id)
            .await?
            .ok_or(ContestError::ProblemNotFound)?;

        if !problem.accepts(answer) {
            tracing::debug!(
                user_id = %actor.id,
                problem_id = %problem_id,
                "Wrong answer"
            );
            return Ok(AnswerOutcome::Wrong);
        }

        // The link insert and the decay are one transaction; a duplicate
        // insert (second success, or a lost race) credits nothing
        let first_solve = self.problem_repo.record_solve(actor.id, problem_id).await?;

        tracing::info!(
            user_id = %actor.id,
            problem_id = %problem_id,
            first_solve,
            "Answer accepted"
        );

        Ok(AnswerOutcome::Accepted)
    }
}
