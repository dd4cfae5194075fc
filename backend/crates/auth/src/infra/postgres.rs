//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entity::{
    audit_log::AuditLogEntry,
    login_attempt::LoginAttempt,
    session::Session,
    user::{NewUser, User},
};
use crate::domain::repository::{
    AuditLogRepository, LoginAttemptRepository, SessionRepository, UserRepository,
};
use crate::domain::value_object::{
    UserId,
    email::Email,
    session_id::SessionId,
    user_name::{PersonName, UserName},
    user_password::UserPassword,
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL unique_violation
const UNIQUE_VIOLATION: &str = "23505";

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

fn map_unique_violation(err: sqlx::Error) -> AuthError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            AuthError::UsernameOrEmailTaken
        }
        _ => AuthError::Database(err),
    }
}

const USER_COLUMNS: &str = r#"
    id,
    username,
    email,
    password_hash,
    first_name,
    last_name,
    role,
    is_active,
    last_login,
    created_at,
    updated_at
"#;

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (
                username,
                email,
                password_hash,
                first_name,
                last_name,
                role,
                is_active
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.password.as_str())
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.role.code())
        .bind(user.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        row.into_user()
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_username_or_email(
        &self,
        username: &UserName,
        email: &Email,
    ) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(username.as_str())
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                password_hash = $3,
                first_name = $4,
                last_name = $5,
                role = $6,
                is_active = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_i64())
        .bind(user.email.as_str())
        .bind(user.password.as_str())
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.role.code())
        .bind(user.is_active)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }

    async fn update_last_login(&self, id: UserId, at: DateTime<Utc>) -> AuthResult<()> {
        sqlx::query("UPDATE users SET last_login = $2 WHERE id = $1")
            .bind(id.as_i64())
            .bind(at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                id,
                user_id,
                access_token,
                refresh_token,
                expires_at,
                created_at,
                last_used_at,
                user_agent,
                ip_address
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(session.id.as_str())
        .bind(session.user_id.as_i64())
        .bind(&session.access_token)
        .bind(&session.refresh_token)
        .bind(session.expires_at)
        .bind(session.created_at)
        .bind(session.last_used_at)
        .bind(session.user_agent.as_deref())
        .bind(session.ip_address.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_by_id(&self, id: &SessionId) -> AuthResult<UserId> {
        let user_id =
            sqlx::query_scalar::<_, i64>("DELETE FROM sessions WHERE id = $1 RETURNING user_id")
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await?
                .ok_or(AuthError::SessionNotFound)?;

        Ok(UserId::from_i64(user_id))
    }
}

// ============================================================================
// Login Attempt Repository Implementation
// ============================================================================

impl LoginAttemptRepository for PgAuthRepository {
    async fn create(&self, attempt: &LoginAttempt) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO login_attempts (
                username,
                ip_address,
                user_agent,
                success,
                reason,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&attempt.username)
        .bind(attempt.ip_address.as_deref())
        .bind(attempt.user_agent.as_deref())
        .bind(attempt.success)
        .bind(attempt.reason.to_string())
        .bind(attempt.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn count_failed_since(&self, username: &str, since: DateTime<Utc>) -> AuthResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM login_attempts
            WHERE username = $1
              AND success = FALSE
              AND created_at > $2
            "#,
        )
        .bind(username)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.max(0) as u64)
    }
}

// ============================================================================
// Audit Log Repository Implementation
// ============================================================================

impl AuditLogRepository for PgAuthRepository {
    async fn create(&self, entry: &AuditLogEntry) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (
                user_id,
                action,
                resource_type,
                resource_id,
                details,
                ip_address,
                user_agent,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.user_id.map(|id| id.as_i64()))
        .bind(entry.action.to_string())
        .bind(entry.resource_type.to_string())
        .bind(entry.resource_id.as_deref())
        .bind(&entry.details)
        .bind(entry.ip_address.as_deref())
        .bind(entry.user_agent.as_deref())
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    role: String,
    is_active: bool,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role: UserRole = self.role.parse().map_err(|_| {
            AuthError::Internal(format!("Invalid role in database: {}", self.role))
        })?;

        Ok(User {
            id: UserId::from_i64(self.id),
            username: UserName::from_db(self.username),
            email: Email::from_db(self.email),
            password: UserPassword::from_db(self.password_hash),
            first_name: PersonName::from_db(self.first_name),
            last_name: PersonName::from_db(self.last_name),
            role,
            is_active: self.is_active,
            last_login: self.last_login,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
