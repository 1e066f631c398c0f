// ABOUTME: JWT-based trainer authentication and password hashing
// ABOUTME: Handles login token generation, validation, and bcrypt credential checks
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! # Authentication
//!
//! JWT-based authentication for trainer accounts. Tokens are signed with a
//! symmetric HS256 secret; passwords are stored as bcrypt hashes.

use crate::errors::{AppError, AppResult};
use crate::models::Trainer;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `JWT` validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
        /// Current time for reference
        current_time: DateTime<Utc>,
    },
    /// Token signature is invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl std::fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenExpired {
                expired_at,
                current_time,
            } => {
                let duration_expired = current_time.signed_duration_since(*expired_at);
                write!(
                    f,
                    "JWT token expired {} minutes ago at {}",
                    duration_expired.num_minutes(),
                    expired_at.format("%Y-%m-%d %H:%M:%S UTC")
                )
            }
            Self::TokenInvalid { reason } => {
                write!(f, "JWT token signature is invalid: {reason}")
            }
            Self::TokenMalformed { details } => {
                write!(f, "JWT token is malformed: {details}")
            }
        }
    }
}

impl std::error::Error for JwtValidationError {}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match &error {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired().with_source(error),
            JwtValidationError::TokenInvalid { reason } => Self::auth_invalid(reason.clone()),
            JwtValidationError::TokenMalformed { details } => Self::auth_invalid(details.clone()),
        }
    }
}

/// `JWT` claims for trainer authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Trainer `ID`
    pub sub: String,
    /// Trainer email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Authenticated request context
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// Authenticated trainer `ID`
    pub trainer_id: Uuid,
    /// Trainer email from the token
    pub email: String,
}

/// Authentication manager for `JWT` tokens
#[derive(Clone)]
pub struct AuthManager {
    jwt_secret: Vec<u8>,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new authentication manager
    #[must_use]
    pub fn new(jwt_secret: Vec<u8>, token_expiry_hours: i64) -> Self {
        Self {
            jwt_secret,
            token_expiry_hours,
        }
    }

    /// Token lifetime in seconds, for login responses
    #[must_use]
    pub const fn token_expiry_seconds(&self) -> i64 {
        self.token_expiry_hours * 3600
    }

    /// Generate a `JWT` token for a trainer
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, trainer: &Trainer) -> Result<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: trainer.id.to_string(),
            email: trainer.email.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.jwt_secret),
        )
        .context("Failed to encode JWT token")
    }

    /// Validate a `JWT` token and return its claims
    ///
    /// # Errors
    ///
    /// Returns [`JwtValidationError`] when the token is expired, malformed,
    /// or carries an invalid signature.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let validation = Validation::new(Algorithm::HS256);

        match decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.jwt_secret),
            &validation,
        ) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    // Decode without expiry validation to report when it expired
                    let mut lenient = Validation::new(Algorithm::HS256);
                    lenient.validate_exp = false;
                    let expired_at = decode::<Claims>(
                        token,
                        &DecodingKey::from_secret(&self.jwt_secret),
                        &lenient,
                    )
                    .ok()
                    .and_then(|data| DateTime::from_timestamp(data.claims.exp, 0))
                    .unwrap_or_else(Utc::now);

                    Err(JwtValidationError::TokenExpired {
                        expired_at,
                        current_time: Utc::now(),
                    })
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    Err(JwtValidationError::TokenMalformed {
                        details: e.to_string(),
                    })
                }
                _ => Err(JwtValidationError::TokenInvalid {
                    reason: e.to_string(),
                }),
            },
        }
    }

    /// Authenticate a `Bearer` authorization header value
    ///
    /// # Errors
    ///
    /// Returns an authentication error when the header is missing the
    /// `Bearer` prefix or the token fails validation.
    pub fn authenticate_header(&self, auth_header: &str) -> AppResult<AuthResult> {
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::auth_invalid("Invalid authorization format"))?;

        let claims = self.validate_token(token)?;

        let trainer_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Invalid trainer ID in token"))?;

        Ok(AuthResult {
            trainer_id,
            email: claims.email,
        })
    }
}

/// Hash a password for storage
///
/// # Errors
///
/// Returns an error if bcrypt hashing fails
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).context("Failed to hash password")
}

/// Verify a password against a stored hash
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::generate_jwt_secret;

    fn create_test_trainer() -> Trainer {
        Trainer::new(
            "coach@example.com".into(),
            "hashed_password_123".into(),
            "Test".into(),
            "Coach".into(),
        )
    }

    #[test]
    fn test_generate_and_validate_token() {
        let auth_manager = AuthManager::new(generate_jwt_secret(), 24);
        let trainer = create_test_trainer();

        let token = auth_manager.generate_token(&trainer).unwrap();
        assert!(!token.is_empty());

        let claims = auth_manager.validate_token(&token).unwrap();
        assert_eq!(claims.email, "coach@example.com");
        assert_eq!(claims.sub, trainer.id.to_string());
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let auth_manager = AuthManager::new(generate_jwt_secret(), 24);
        let other_manager = AuthManager::new(generate_jwt_secret(), 24);
        let trainer = create_test_trainer();

        let token = auth_manager.generate_token(&trainer).unwrap();
        assert!(other_manager.validate_token(&token).is_err());
    }

    #[test]
    fn test_malformed_token_rejected() {
        let auth_manager = AuthManager::new(generate_jwt_secret(), 24);
        assert!(auth_manager.validate_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_authenticate_header_requires_bearer() {
        let auth_manager = AuthManager::new(generate_jwt_secret(), 24);
        let trainer = create_test_trainer();
        let token = auth_manager.generate_token(&trainer).unwrap();

        let auth = auth_manager
            .authenticate_header(&format!("Bearer {token}"))
            .unwrap();
        assert_eq!(auth.trainer_id, trainer.id);

        assert!(auth_manager.authenticate_header(&token).is_err());
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash));
        assert!(!verify_password("wrong password", &hash));
    }
}
