//! Create Problem Use Case

use std::sync::Arc;

use auth::domain::entity::user::User;

use crate::domain::entities::{NewProblem, Problem};
use crate::domain::policy;
use crate::domain::repository::ProblemRepository;
use crate::domain::scoring;
use crate::error::{ContestError, ContestResult};

/// Create problem input; the owner comes from the session, not the body
pub struct CreateProblemInput {
    pub name: String,
    pub description: Option<String>,
    pub answer: Option<String>,
    pub score_initial: i64,
}

/// Create problem use case
pub struct CreateProblemUseCase<P>
where
    P: ProblemRepository,
{
    problem_repo: Arc<P>,
}

impl<P> CreateProblemUseCase<P>
where
    P: ProblemRepository,
{
    pub fn new(problem_repo: Arc<P>) -> Self {
        Self { problem_repo }
    }

    pub async fn execute(&self, actor: &User, input: CreateProblemInput) -> ContestResult<Problem> {
        policy::check_create_problem(actor.tier)?;

        if !scoring::is_valid_initial_score(input.score_initial) {
            return Err(ContestError::Validation(
                "score_initial must be a multiple of 10 in 10..=10000".to_string(),
            ));
        }

        if self.problem_repo.exists_by_name(&input.name).await? {
            return Err(ContestError::NameTaken);
        }

        let problem = self
            .problem_repo
            .create(&NewProblem {
                owner_id: actor.id,
                name: input.name,
                description: input.description,
                answer: input.answer,
                score_initial: input.score_initial,
            })
            .await?;

        tracing::info!(
            problem_id = %problem.id,
            owner_id = %actor.id,
            score_initial = problem.score_initial,
            "Problem created"
        );

        Ok(problem)
    }
}
