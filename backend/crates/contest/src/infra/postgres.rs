//! PostgreSQL Repository Implementations

use sqlx::PgPool;

use kernel::id::{ProblemId, UserId};

use crate::domain::entities::{NewProblem, Problem, RankEntry};
use crate::domain::repository::ProblemRepository;
use crate::error::{ContestError, ContestResult};

/// PostgreSQL-backed contest repository
#[derive(Clone)]
pub struct PgContestRepository {
    pool: PgPool,
}

impl PgContestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a unique-constraint race on the problem name to Conflict.
fn map_problem_unique_violation(err: sqlx::Error) -> ContestError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return ContestError::NameTaken;
        }
    }
    ContestError::Database(err)
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProblemRow {
    id: i64,
    owner_id: i64,
    name: String,
    description: Option<String>,
    answer: Option<String>,
    score_initial: i64,
    score_now: i64,
}

impl ProblemRow {
    fn into_problem(self) -> Problem {
        Problem {
            id: ProblemId::from_i64(self.id),
            owner_id: UserId::from_i64(self.owner_id),
            name: self.name,
            description: self.description,
            answer: self.answer,
            score_initial: self.score_initial,
            score_now: self.score_now,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RankRow {
    user_id: i64,
    name: String,
    total_score: i64,
}

impl RankRow {
    fn into_entry(self) -> RankEntry {
        RankEntry {
            user_id: UserId::from_i64(self.user_id),
            name: self.name,
            total_score: self.total_score,
        }
    }
}

// ============================================================================
// Problem Repository Implementation
// ============================================================================

impl ProblemRepository for PgContestRepository {
    async fn create(&self, problem: &NewProblem) -> ContestResult<Problem> {
        let row = sqlx::query_as::<_, ProblemRow>(
            r#"
            INSERT INTO problems (owner_id, name, description, answer, score_initial, score_now)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, owner_id, name, description, answer, score_initial, score_now
            "#,
        )
        .bind(problem.owner_id.as_i64())
        .bind(&problem.name)
        .bind(problem.description.as_deref())
        .bind(problem.answer.as_deref())
        .bind(problem.score_initial)
        .fetch_one(&self.pool)
        .await
        .map_err(map_problem_unique_violation)?;

        Ok(row.into_problem())
    }

    async fn find_by_id(&self, id: ProblemId) -> ContestResult<Option<Problem>> {
        let row = sqlx::query_as::<_, ProblemRow>(
            r#"
            SELECT id, owner_id, name, description, answer, score_initial, score_now
            FROM problems
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_problem()))
    }

    async fn exists_by_name(&self, name: &str) -> ContestResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM problems WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn list(&self, skip: i64, limit: i64) -> ContestResult<Vec<Problem>> {
        let rows = sqlx::query_as::<_, ProblemRow>(
            r#"
            SELECT id, owner_id, name, description, answer, score_initial, score_now
            FROM problems
            ORDER BY id
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_problem()).collect())
    }

    async fn update(&self, problem: &Problem) -> ContestResult<()> {
        sqlx::query(
            r#"
            UPDATE problems SET
                name = $2,
                description = $3,
                answer = $4,
                score_initial = $5,
                score_now = $6
            WHERE id = $1
            "#,
        )
        .bind(problem.id.as_i64())
        .bind(&problem.name)
        .bind(problem.description.as_deref())
        .bind(problem.answer.as_deref())
        .bind(problem.score_initial)
        .bind(problem.score_now)
        .execute(&self.pool)
        .await
        .map_err(map_problem_unique_violation)?;

        Ok(())
    }

    async fn delete(&self, id: ProblemId) -> ContestResult<()> {
        sqlx::query("DELETE FROM problems WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        tracing::info!(problem_id = %id, "Problem row deleted");

        Ok(())
    }

    async fn record_solve(&self, user_id: UserId, problem_id: ProblemId) -> ContestResult<bool> {
        let mut tx = self.pool.begin().await?;

        // The composite primary key absorbs races: whoever loses the
        // insert sees zero rows affected and skips the decay
        let inserted = sqlx::query(
            r#"
            INSERT INTO userproblemlink (user_id, problem_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id.as_i64())
        .bind(problem_id.as_i64())
        .execute(&mut *tx)
        .await?
        .rows_affected()
            == 1;

        if inserted {
            // Same rule as domain::scoring::decayed_score: no decay once
            // score_now sits at score_initial / 10
            sqlx::query(
                r#"
                UPDATE problems
                SET score_now = score_now - score_initial / 10
                WHERE id = $1 AND score_now <> score_initial / 10
                "#,
            )
            .bind(problem_id.as_i64())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(inserted)
    }

    async fn get_rank(&self, skip: i64, limit: i64) -> ContestResult<Vec<RankEntry>> {
        let rows = sqlx::query_as::<_, RankRow>(
            r#"
            SELECT u.id AS user_id, u.name, SUM(p.score_now)::BIGINT AS total_score
            FROM userproblemlink l
            JOIN users u ON u.id = l.user_id
            JOIN problems p ON p.id = l.problem_id
            GROUP BY u.id, u.name
            ORDER BY total_score DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_entry()).collect())
    }
}
