//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::SessionId;
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    auth_session::AuthSession,
    profile::{Profile, ProfileFields},
    role::Role,
    user::{NewUser, User},
};
use crate::domain::repository::{
    AuthSessionRepository, ProfileRepository, RoleRepository, UserRepository,
};
use crate::domain::value_object::username::Username;
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

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create_with_profile(
        &self,
        user: &NewUser,
        profile: &ProfileFields,
    ) -> AuthResult<i64> {
        let mut tx = self.pool.begin().await?;

        let user_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (username, password_hash, role_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.role_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        sqlx::query(
            r#"
            INSERT INTO profiles (
                user_id,
                username,
                nickname,
                firstname,
                lastname,
                email,
                gender,
                birthday
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user_id)
        .bind(user.username.as_str())
        .bind(&profile.nickname)
        .bind(&profile.firstname)
        .bind(&profile.lastname)
        .bind(&profile.email)
        .bind(&profile.gender)
        .bind(profile.birthday)
        .execute(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        tx.commit().await?;

        Ok(user_id)
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, role_id
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(username.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update_password(
        &self,
        username: &Username,
        password_hash: &HashedPassword,
    ) -> AuthResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .bind(password_hash.as_phc_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Profile Repository Implementation
// ============================================================================

impl ProfileRepository for PgAuthRepository {
    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT
                user_id,
                username,
                nickname,
                firstname,
                lastname,
                email,
                gender,
                birthday
            FROM profiles
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProfileRow::into_profile))
    }

    async fn update(&self, username: &Username, fields: &ProfileFields) -> AuthResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE profiles SET
                nickname = $2,
                firstname = $3,
                lastname = $4,
                email = $5,
                gender = $6,
                birthday = $7
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .bind(&fields.nickname)
        .bind(&fields.firstname)
        .bind(&fields.lastname)
        .bind(&fields.email)
        .bind(&fields.gender)
        .bind(fields.birthday)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Role Repository Implementation
// ============================================================================

impl RoleRepository for PgAuthRepository {
    async fn find_by_id(&self, role_id: i32) -> AuthResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name, description FROM roles WHERE id = $1",
        )
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Role {
            id: r.id,
            name: r.name,
            description: r.description,
        }))
    }
}

// ============================================================================
// Auth Session Repository Implementation
// ============================================================================

impl AuthSessionRepository for PgAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                user_id,
                username,
                nickname,
                role_id,
                role_name,
                gender,
                expires_at_ms,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.user_id)
        .bind(&session.username)
        .bind(&session.nickname)
        .bind(session.role_id)
        .bind(&session.role_name)
        .bind(&session.gender)
        .bind(session.expires_at_ms)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_active(
        &self,
        session_id: SessionId,
        now_ms: i64,
    ) -> AuthResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT
                session_id,
                user_id,
                username,
                nickname,
                role_id,
                role_name,
                gender,
                expires_at_ms,
                created_at
            FROM auth_sessions
            WHERE session_id = $1 AND expires_at_ms > $2
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(now_ms)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuthSessionRow::into_session))
    }

    async fn update_profile_fields(
        &self,
        session_id: SessionId,
        nickname: &str,
        gender: &str,
    ) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE auth_sessions
            SET nickname = $2, gender = $3
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(nickname)
        .bind(gender)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn expire(&self, session_id: SessionId, now_ms: i64) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE auth_sessions
            SET expires_at_ms = LEAST(expires_at_ms, $2)
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(now_ms)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn cleanup_expired(&self, now_ms: i64) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at_ms <= $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}

fn map_unique_violation(err: sqlx::Error) -> AuthError {
    if is_unique_violation(&err) {
        AuthError::UserNameTaken
    } else {
        AuthError::Database(err)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    role_id: i32,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            id: self.id,
            username: Username::from_trusted(self.username),
            password_hash: HashedPassword::from_phc_string(self.password_hash)?,
            role_id: self.role_id,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    user_id: i64,
    username: String,
    nickname: String,
    firstname: String,
    lastname: String,
    email: String,
    gender: String,
    birthday: Option<NaiveDate>,
}

impl ProfileRow {
    fn into_profile(self) -> Profile {
        Profile {
            user_id: self.user_id,
            username: self.username,
            fields: ProfileFields {
                nickname: self.nickname,
                firstname: self.firstname,
                lastname: self.lastname,
                email: self.email,
                gender: self.gender,
                birthday: self.birthday,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    id: i32,
    name: String,
    description: String,
}

#[derive(sqlx::FromRow)]
struct AuthSessionRow {
    session_id: Uuid,
    user_id: i64,
    username: String,
    nickname: String,
    role_id: i32,
    role_name: String,
    gender: String,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
}

impl AuthSessionRow {
    fn into_session(self) -> AuthSession {
        AuthSession {
            session_id: SessionId::from_uuid(self.session_id),
            user_id: self.user_id,
            username: self.username,
            nickname: self.nickname,
            role_id: self.role_id,
            role_name: self.role_name,
            gender: self.gender,
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
        }
    }
}
