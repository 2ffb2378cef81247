//! Domain Entities

use kernel::id::{ProblemId, UserId};

/// Problem entity
///
/// `score_now` is shared by all solvers; it starts at `score_initial`
/// and decays as users solve the problem.
#[derive(Debug, Clone)]
pub struct Problem {
    pub id: ProblemId,
    pub owner_id: UserId,
    /// Unique name
    pub name: String,
    pub description: Option<String>,
    /// Secret expected answer; `None` never matches any submission
    pub answer: Option<String>,
    /// Positive multiple of 10
    pub score_initial: i64,
    /// Current value awarded for a solve
    pub score_now: i64,
}

impl Problem {
    /// Exact-equality answer check
    pub fn accepts(&self, submitted: &str) -> bool {
        self.answer.as_deref() == Some(submitted)
    }

    /// Change the initial score, adjusting the current score
    /// proportionally so relative decay is preserved:
    /// `new_current = old_current * new_initial / old_initial`.
    pub fn rescale(&mut self, new_initial: i64) {
        self.score_now = self.score_now * new_initial / self.score_initial;
        self.score_initial = new_initial;
    }
}

/// Problem about to be inserted; the database assigns the id and
/// `score_now` starts at `score_initial`.
#[derive(Debug, Clone)]
pub struct NewProblem {
    pub owner_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub answer: Option<String>,
    pub score_initial: i64,
}

/// One leaderboard row: a user and the sum of current scores across
/// the problems they solved.
#[derive(Debug, Clone)]
pub struct RankEntry {
    pub user_id: UserId,
    pub name: String,
    pub total_score: i64,
}
