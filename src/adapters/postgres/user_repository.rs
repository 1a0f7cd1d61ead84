//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::support::{column, db_error, is_unique_violation, timestamp};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::{Email, User};
use crate::ports::UserRepository;

const USER_COLUMNS: &str = "id, email, password_hash, name, location, bio, photo, \
                            phone_number, phone_verified, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                id, email, password_hash, name, location, bio, photo,
                phone_number, phone_verified, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.email().as_str())
        .bind(user.password_hash())
        .bind(user.name())
        .bind(user.location())
        .bind(user.bio())
        .bind(user.photo())
        .bind(user.phone_number())
        .bind(user.phone_verified())
        .bind(user.created_at().as_datetime())
        .bind(user.updated_at().as_datetime())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(DomainError::new(
                ErrorCode::DuplicateEmail,
                "An account with this email already exists",
            )),
            Err(e) => Err(db_error("Failed to insert user", e)),
        }
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                location = $3,
                bio = $4,
                photo = $5,
                phone_number = $6,
                phone_verified = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.name())
        .bind(user.location())
        .bind(user.bio())
        .bind(user.photo())
        .bind(user.phone_number())
        .bind(user.phone_verified())
        .bind(user.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(
                ErrorCode::UserNotFound,
                "User",
                user.id(),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch user", e))?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch user by email", e))?;

        row.map(row_to_user).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, DomainError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check email", e))?;

        Ok(result.0)
    }
}

fn row_to_user(row: PgRow) -> Result<User, DomainError> {
    let id: Uuid = column(&row, "id")?;
    let email: String = column(&row, "email")?;

    Ok(User::reconstitute(
        UserId::from_uuid(id),
        Email::from_trusted(email),
        column(&row, "password_hash")?,
        column(&row, "name")?,
        column(&row, "location")?,
        column(&row, "bio")?,
        column(&row, "photo")?,
        column(&row, "phone_number")?,
        column(&row, "phone_verified")?,
        timestamp(&row, "created_at")?,
        timestamp(&row, "updated_at")?,
    ))
}
