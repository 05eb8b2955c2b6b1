//! User repository for database operations

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{NewUser, Role, User};

/// Normalize an email for storage and lookup; uniqueness is
/// case-insensitive by construction
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn user_from_row(row: &sqlx::postgres::PgRow) -> User {
    let role: String = row.get("role");
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        role: Role::from_db(&role),
        created_at: row.get("created_at"),
    }
}

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user with a hashed password
    ///
    /// Returns `None` when the email is already taken; the unique index
    /// plus `ON CONFLICT DO NOTHING` guarantee at most one account per
    /// email even under concurrent registrations.
    pub async fn create(&self, new_user: &NewUser) -> Result<Option<User>> {
        info!("Creating new user: {}", normalize_email(&new_user.email));

        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(new_user.password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
            .to_string();

        let row = sqlx::query(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, name, email, password_hash, role, created_at
            "#,
        )
        .bind(new_user.name.trim())
        .bind(normalize_email(&new_user.email))
        .bind(&password_hash)
        .bind(new_user.role.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| user_from_row(&row)))
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| user_from_row(&row)))
    }

    /// Verify a password against a user's stored hash
    pub fn verify_password(&self, user: &User, password: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

        let argon2 = Argon2::default();
        Ok(argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email(" Test@Example.COM "), "test@example.com");
        assert_eq!(normalize_email("user@shop.io"), "user@shop.io");
    }
}
