//! User model and role handling

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User role controlling access to inventory mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Database representation of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Parse a role from its stored form, defaulting to `User` for
    /// anything unrecognized
    pub fn from_db(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// New user creation payload
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Request for user registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

/// Request for user login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public projection of a user, safe to return to clients
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Response for successful registration or login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!(Role::from_db(Role::Admin.as_str()), Role::Admin);
        assert_eq!(Role::from_db(Role::User.as_str()), Role::User);
    }

    #[test]
    fn test_unknown_role_defaults_to_user() {
        assert_eq!(Role::from_db("superuser"), Role::User);
        assert_eq!(Role::from_db(""), Role::User);
    }

    #[test]
    fn test_role_deserializes_lowercase() {
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
        assert!(serde_json::from_str::<Role>("\"root\"").is_err());
    }

    #[test]
    fn test_user_response_omits_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "secret-hash".to_string(),
            role: Role::User,
            created_at: Utc::now(),
        };

        let body = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!body.contains("secret-hash"));
        assert!(body.contains("test@example.com"));
    }
}
