//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::time::Duration;

use kernel::id::UserId;
use kernel::tier::Tier;

use crate::domain::entity::confirmation::Confirmation;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{ConfirmationRepository, UserRepository};
use crate::domain::value_object::{Email, Purpose, UserName, UserPassword};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a unique-constraint race to the matching Conflict variant.
/// Anything else passes through as a database error.
fn map_user_unique_violation(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return if db_err.constraint().is_some_and(|c| c.contains("email")) {
                AuthError::EmailTaken
            } else {
                AuthError::NameTaken
            };
        }
    }
    AuthError::Database(err)
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: Option<String>,
    password: String,
    permission: i16,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            id: UserId::from_i64(self.id),
            name: UserName::from_db(self.name),
            email: self.email.map(Email::from_db),
            password: UserPassword::from_phc(self.password)
                .map_err(|e| AuthError::Internal(e.to_string()))?,
            tier: Tier::from_id(self.permission),
        })
    }
}

#[derive(sqlx::FromRow)]
struct ConfirmationRow {
    email: String,
    option: String,
    token: String,
    create_time: DateTime<Utc>,
}

impl ConfirmationRow {
    fn into_confirmation(self) -> AuthResult<Confirmation> {
        let purpose = Purpose::from_code(&self.option)
            .ok_or_else(|| AuthError::Internal(format!("Unknown purpose: {}", self.option)))?;
        Ok(Confirmation {
            email: Email::from_db(self.email),
            purpose,
            token: self.token,
            create_time: self.create_time,
        })
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email, password, permission)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password, permission
            "#,
        )
        .bind(user.name.as_str())
        .bind(user.email.as_ref().map(|e| e.as_str()))
        .bind(user.password.as_phc_string())
        .bind(user.tier.id())
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_unique_violation)?;

        row.into_user()
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password, permission FROM users WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_name(&self, name: &str) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password, permission FROM users WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password, permission FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_name(&self, name: &str) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &str) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn list(&self, skip: i64, limit: i64) -> AuthResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password, permission
            FROM users
            ORDER BY id
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                email = $3,
                password = $4,
                permission = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_i64())
        .bind(user.name.as_str())
        .bind(user.email.as_ref().map(|e| e.as_str()))
        .bind(user.password.as_phc_string())
        .bind(user.tier.id())
        .execute(&self.pool)
        .await
        .map_err(map_user_unique_violation)?;

        Ok(())
    }

    async fn delete(&self, id: UserId) -> AuthResult<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        tracing::info!(user_id = %id, "User row deleted");

        Ok(())
    }
}

// ============================================================================
// Confirmation Repository Implementation
// ============================================================================

impl ConfirmationRepository for PgAuthRepository {
    async fn upsert(&self, confirmation: &Confirmation) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO confirmations (email, "option", token, create_time)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email, "option")
            DO UPDATE SET token = EXCLUDED.token, create_time = EXCLUDED.create_time
            "#,
        )
        .bind(confirmation.email.as_str())
        .bind(confirmation.purpose.code())
        .bind(&confirmation.token)
        .bind(confirmation.create_time)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_fresh(
        &self,
        email: &str,
        purpose: Purpose,
        window: Duration,
    ) -> AuthResult<Option<Confirmation>> {
        let window = chrono::Duration::from_std(window)
            .map_err(|e| AuthError::Internal(format!("Invalid confirmation window: {e}")))?;
        let cutoff = Utc::now() - window;

        let row = sqlx::query_as::<_, ConfirmationRow>(
            r#"
            SELECT email, "option", token, create_time
            FROM confirmations
            WHERE email = $1 AND "option" = $2 AND create_time >= $3
            "#,
        )
        .bind(email)
        .bind(purpose.code())
        .bind(cutoff)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_confirmation()).transpose()
    }

    async fn delete(&self, email: &str, purpose: Purpose) -> AuthResult<()> {
        sqlx::query(r#"DELETE FROM confirmations WHERE email = $1 AND "option" = $2"#)
            .bind(email)
            .bind(purpose.code())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
