//! JWT issuing and validation
//!
//! Tokens are stateless bearer credentials signed with HS256. Claims carry
//! the user id and role so handlers never need a user lookup to authorize
//! a request.

use anyhow::Result;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::models::{Role, User};

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret for signing and verifying tokens
    pub secret: String,
    /// Token lifetime in seconds (default: 7 days)
    pub token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Signing secret (required)
    /// - `JWT_EXPIRY_SECONDS`: Token lifetime in seconds (default: 604800)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        let token_expiry = std::env::var("JWT_EXPIRY_SECONDS")
            .unwrap_or_else(|_| "604800".to_string()) // 7 days
            .parse()
            .unwrap_or(604800);

        Ok(JwtConfig {
            secret,
            token_expiry,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// User role
    pub role: Role,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_expiry: u64,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: &JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.validate_exp = true;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            token_expiry: config.token_expiry,
        }
    }

    /// Issue a token for a user
    pub fn issue(&self, user: &User) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = Claims {
            sub: user.id,
            role: user.role,
            iat: now,
            exp: now + self.token_expiry,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token and return its claims
    pub fn validate(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_service(secret: &str) -> JwtService {
        JwtService::new(&JwtConfig {
            secret: secret.to_string(),
            token_expiry: 3600,
        })
    }

    fn test_user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "hash".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_and_validate_round_trip() {
        let service = test_service("test-secret");
        let user = test_user(Role::Admin);

        let token = service.issue(&user).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = test_service("secret-a");
        let verifier = test_service("secret-b");
        let token = issuer.issue(&test_user(Role::User)).unwrap();

        assert!(verifier.validate(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = test_service("test-secret");
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        // Expired well beyond the default validation leeway
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: Role::User,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let service = test_service("test-secret");
        assert!(service.validate("not-a-token").is_err());
    }
}
