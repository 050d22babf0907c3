use sqlx::PgPool;
use uuid::Uuid;

use crate::database::patch::Patch;
use crate::dto::user_dto::{CreateUserPayload, UpdateUserPayload};
use crate::error::{Error, Result};
use crate::models::authz::Role;
use crate::models::user::User;
use crate::utils::crypto::hash_password;

const USER_COLUMNS: &str = "id, email, password_hash, name, role, created_at";

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<User> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        user.ok_or_else(|| Error::NotFound("user_not_found".to_string()))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.trim().to_ascii_lowercase())
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn create(&self, payload: CreateUserPayload, role: Role) -> Result<User> {
        let email = payload.email.trim().to_ascii_lowercase();
        let password_hash = hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("password hashing failed: {}", e)))?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash, name, role) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .bind(password_hash)
        .bind(payload.name.map(|n| n.trim().to_string()))
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_email)?;

        Ok(user)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateUserPayload) -> Result<User> {
        let mut patch = Patch::new("users");

        if let Some(email) = payload.email {
            patch.set("email", email.trim().to_ascii_lowercase());
        }
        if let Some(name) = payload.name {
            patch.set("name", name.map(|n| n.trim().to_string()));
        }
        if let Some(raw) = payload.role {
            let role = Role::parse(&raw)
                .ok_or_else(|| Error::BadRequest("invalid role".to_string()))?;
            patch.set("role", role.as_str());
        }
        if let Some(password) = payload.password {
            let password_hash = hash_password(&password)
                .map_err(|e| Error::Internal(format!("password hashing failed: {}", e)))?;
            patch.set("password_hash", password_hash);
        }

        if patch.is_empty() {
            return Err(Error::BadRequest("no fields to update".to_string()));
        }

        let mut builder = patch.by_id(id, USER_COLUMNS);
        let user = builder
            .build_query_as::<User>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_unique_email)?;
        user.ok_or_else(|| Error::NotFound("user_not_found".to_string()))
    }

    /// `acting` is the caller; deleting your own account is rejected so
    /// an admin cannot lock themselves out mid-session.
    pub async fn delete(&self, id: Uuid, acting: Uuid) -> Result<()> {
        if id == acting {
            return Err(Error::BadRequest("cannot delete yourself".to_string()));
        }
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("user_not_found".to_string()));
        }
        Ok(())
    }
}

/// The unique index on users.email is the authority; a violation maps to
/// a stable 409 code instead of a generic 500.
fn map_unique_email(err: sqlx::Error) -> Error {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            return Error::Conflict("email_taken".to_string());
        }
    }
    err.into()
}
