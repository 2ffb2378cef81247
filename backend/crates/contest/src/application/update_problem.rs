//! Update Problem Use Case

use std::sync::Arc;

use auth::domain::entity::user::User;
use kernel::id::ProblemId;

use crate::domain::entities::Problem;
use crate::domain::policy;
use crate::domain::repository::ProblemRepository;
use crate::domain::scoring;
use crate::error::{ContestError, ContestResult};

/// Partial update; absent fields are left untouched
#[derive(Default)]
pub struct UpdateProblemInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub answer: Option<String>,
    pub score_initial: Option<i64>,
}

/// Update problem use case
pub struct UpdateProblemUseCase<P>
where
    P: ProblemRepository,
{
    problem_repo: Arc<P>,
}

impl<P> UpdateProblemUseCase<P>
where
    P: ProblemRepository,
{
    pub fn new(problem_repo: Arc<P>) -> Self {
        Self { problem_repo }
    }

    pub async fn execute(
        &self,
        actor: &User,
        problem_id: ProblemId,
        input: UpdateProblemInput,
    ) -> ContestResult<Problem> {
        let mut problem = self
            .problem_repo
            .find_by_id(problem_id)
            .await?
            .ok_or(ContestError::ProblemNotFound)?;

        policy::check_modify_problem(actor.id, actor.tier, problem.owner_id)?;

        if let Some(name) = input.name {
            if name != problem.name && self.problem_repo.exists_by_name(&name).await? {
                return Err(ContestError::NameTaken);
            }
            problem.name = name;
        }

        if let Some(description) = input.description {
            problem.description = Some(description);
        }

        if let Some(answer) = input.answer {
            problem.answer = Some(answer);
        }

        if let Some(new_initial) = input.score_initial {
            if !scoring::is_valid_initial_score(new_initial) {
                return Err(ContestError::Validation(
                    "score_initial must be a multiple of 10 in 10..=10000".to_string(),
                ));
            }
            // Preserves relative decay for everyone who already solved it
            problem.rescale(new_initial);
        }

        self.problem_repo.update(&problem).await?;

        tracing::info!(
            problem_id = %problem.id,
            actor_id = %actor.id,
            "Problem updated"
        );

        Ok(problem)
    }
}
