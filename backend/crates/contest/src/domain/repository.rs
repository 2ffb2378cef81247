//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in the
//! infrastructure layer.

use kernel::id::{ProblemId, UserId};

use crate::domain::entities::{NewProblem, Problem, RankEntry};
use crate::error::ContestResult;

/// Problem repository trait
#[trait_variant::make(ProblemRepository: Send)]
pub trait LocalProblemRepository {
    /// Insert a new problem (current score starts at the initial score)
    async fn create(&self, problem: &NewProblem) -> ContestResult<Problem>;

    /// Find problem by ID
    async fn find_by_id(&self, id: ProblemId) -> ContestResult<Option<Problem>>;

    /// Check if a problem name is already registered
    async fn exists_by_name(&self, name: &str) -> ContestResult<bool>;

    /// List problems, paginated
    async fn list(&self, skip: i64, limit: i64) -> ContestResult<Vec<Problem>>;

    /// Persist changes to an existing problem
    async fn update(&self, problem: &Problem) -> ContestResult<()>;

    /// Delete a problem; the solve-link table cascades
    async fn delete(&self, id: ProblemId) -> ContestResult<()>;

    /// Atomically credit a solve: insert the solve-link and, only when
    /// the link is new, decay the problem's current score (guarded so it
    /// floors at `score_initial / 10`). Returns true when this call
    /// credited a first solve for the pair.
    async fn record_solve(&self, user_id: UserId, problem_id: ProblemId) -> ContestResult<bool>;

    /// Leaderboard: users with their summed current scores, descending
    async fn get_rank(&self, skip: i64, limit: i64) -> ContestResult<Vec<RankEntry>>;
}
