//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Problem, RankEntry};
use crate::domain::scoring::AnswerOutcome;

// ============================================================================
// Problems
// ============================================================================

/// Request for POST /problems; the owner comes from the session
#[derive(Debug, Clone, Deserialize)]
pub struct ProblemCreateRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    pub score_initial: i64,
}

/// Request for PUT /problems/{problem_id}; absent fields stay untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProblemUpdateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub score_initial: Option<i64>,
}

/// Problem read model; `answer` is nulled for unprivileged requesters
#[derive(Debug, Clone, Serialize)]
pub struct ProblemResponse {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub answer: Option<String>,
    pub score_initial: i64,
    pub score_now: i64,
}

impl ProblemResponse {
    pub fn from_problem(problem: &Problem, include_answer: bool) -> Self {
        Self {
            id: problem.id.as_i64(),
            owner_id: problem.owner_id.as_i64(),
            name: problem.name.clone(),
            description: problem.description.clone(),
            answer: if include_answer {
                problem.answer.clone()
            } else {
                None
            },
            score_initial: problem.score_initial,
            score_now: problem.score_now,
        }
    }
}

// ============================================================================
// Answers
// ============================================================================

/// Request for POST /users/{user_id}/problems/{problem_id}
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

/// Submission outcome envelope
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub status: String,
}

impl AnswerResponse {
    pub fn from_outcome(outcome: AnswerOutcome) -> Self {
        Self {
            status: outcome.status().to_string(),
        }
    }
}

// ============================================================================
// Rank
// ============================================================================

/// One row of GET /users/rank
#[derive(Debug, Clone, Serialize)]
pub struct RankEntryResponse {
    pub id: i64,
    pub name: String,
    pub total_score: i64,
}

impl RankEntryResponse {
    pub fn from_entry(entry: &RankEntry) -> Self {
        Self {
            id: entry.user_id.as_i64(),
            name: entry.name.clone(),
            total_score: entry.total_score,
        }
    }
}

// ============================================================================
// Pagination
// ============================================================================

fn default_limit() -> i64 {
    100
}

/// skip/limit query parameters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}
