//! Delete Problem Use Case

use std::sync::Arc;

use auth::domain::entity::user::User;
use kernel::id::ProblemId;

use crate::domain::policy;
use crate::domain::repository::ProblemRepository;
use crate::error::{ContestError, ContestResult};

/// Delete problem use case
pub struct DeleteProblemUseCase<P>
where
    P: ProblemRepository,
{
    problem_repo: Arc<P>,
}

impl<P> DeleteProblemUseCase<P>
where
    P: ProblemRepository,
{
    pub fn new(problem_repo: Arc<P>) -> Self {
        Self { problem_repo }
    }

    pub async fn execute(&self, actor: &User, problem_id: ProblemId) -> ContestResult<()> {
        let problem = self
            .problem_repo
            .find_by_id(problem_id)
            .await?
            .ok_or(ContestError::ProblemNotFound)?;

        policy::check_modify_problem(actor.id, actor.tier, problem.owner_id)?;

        self.problem_repo.delete(problem.id).await?;

        tracing::info!(
            problem_id = %problem.id,
            actor_id = %actor.id,
            "Problem deleted"
        );

        Ok(())
    }
}
