//! User repository
//!
//! - get by id / email: single-row lookups, NotFound when absent
//! - add: INSERT ... ON CONFLICT DO NOTHING, Conflict when the email is taken

use sqlx::PgPool;

use super::log_failure;
use crate::models::{NewUser, User};
use crate::{DbError, Result};

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a single user by id.
    pub async fn get_with_id(&self, id: i32) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(DbError::from)
        .and_then(|row| row.ok_or_else(|| DbError::not_found("user", id)))
        .inspect_err(|e| log_failure("get_user_with_id", e))
    }

    /// Get a single user by email (exact match).
    pub async fn get_with_email(&self, email: &str) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(DbError::from)
        .and_then(|row| row.ok_or_else(|| DbError::not_found("user", email)))
        .inspect_err(|e| log_failure("get_user_with_email", e))
    }

    /// Add a user unless the email is already registered.
    ///
    /// Uniqueness is the `users.email` constraint; a concurrent insert of the
    /// same email waits on it and then returns no row.
    pub async fn add(&self, user: &NewUser) -> Result<User> {
        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, name, email, password
            "#,
        )
        .bind(user.name())
        .bind(user.email())
        .bind(user.password())
        .fetch_optional(self.pool)
        .await
        .map_err(DbError::from)
        .and_then(|row| row.ok_or_else(|| DbError::conflict("user", "email", user.email())))
        .inspect_err(|e| log_failure("add_user", e))?;

        tracing::info!(user_id = inserted.id, "user added");
        Ok(inserted)
    }
}
