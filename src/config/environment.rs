// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! Environment-based configuration management for production deployment

use crate::analytics::dashboard::WeekStart;
use crate::constants::{defaults, limits};
use anyhow::{Context, Result};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment type for security and other configurations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL, e.g. `sqlite:data/studio.db`
    pub url: String,
}

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret for trainer JWTs
    pub jwt_secret: Vec<u8>,
    /// Token lifetime in hours
    pub token_expiry_hours: i64,
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Comma-separated origin list, or "*" for any origin
    pub allowed_origins: String,
}

/// Photo storage configuration
#[derive(Debug, Clone)]
pub struct PhotoStorageConfig {
    /// Directory where uploaded photos are written
    pub root: PathBuf,
}

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// First day of the calendar week used for weekly stats
    pub week_start: WeekStart,
}

/// Complete server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database settings
    pub database: DatabaseConfig,
    /// Authentication settings
    pub auth: AuthConfig,
    /// CORS settings
    pub cors: CorsConfig,
    /// Photo storage settings
    pub photos: PhotoStorageConfig,
    /// Dashboard settings
    pub dashboard: DashboardConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable fails to parse or the JWT
    /// secret cannot be loaded or generated.
    pub fn from_env() -> Result<Self> {
        let http_port = env::var("HTTP_PORT")
            .ok()
            .map(|p| p.parse::<u16>().context("Invalid HTTP_PORT"))
            .transpose()?
            .unwrap_or(defaults::HTTP_PORT);

        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        );

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or_else(|_| defaults::DATABASE_URL.into()),
        };

        let token_expiry_hours = env::var("JWT_EXPIRY_HOURS")
            .ok()
            .map(|h| h.parse::<i64>().context("Invalid JWT_EXPIRY_HOURS"))
            .transpose()?
            .unwrap_or(defaults::TOKEN_EXPIRY_HOURS);

        let auth = AuthConfig {
            jwt_secret: load_jwt_secret(&environment)?,
            token_expiry_hours,
        };

        let cors = CorsConfig {
            allowed_origins: env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".into()),
        };

        let photos = PhotoStorageConfig {
            root: PathBuf::from(
                env::var("PHOTO_STORAGE_ROOT")
                    .unwrap_or_else(|_| defaults::PHOTO_STORAGE_ROOT.into()),
            ),
        };

        let dashboard = DashboardConfig {
            week_start: WeekStart::from_str_or_default(
                &env::var("DASHBOARD_WEEK_START").unwrap_or_else(|_| "sunday".into()),
            ),
        };

        Ok(Self {
            http_port,
            environment,
            database,
            auth,
            cors,
            photos,
            dashboard,
        })
    }

    /// One-line configuration summary for startup logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "environment={} http_port={} database={} photos={} week_start={} cors={}",
            self.environment,
            self.http_port,
            self.database.url,
            self.photos.root.display(),
            self.dashboard.week_start,
            self.cors.allowed_origins,
        )
    }
}

/// Load the JWT signing secret
///
/// Resolution order: `JWT_SECRET` env var (hex-encoded), then the secret
/// file at `JWT_SECRET_PATH`. If neither exists a fresh secret is generated
/// and persisted so tokens survive restarts.
fn load_jwt_secret(environment: &Environment) -> Result<Vec<u8>> {
    if let Ok(hex_secret) = env::var("JWT_SECRET") {
        return hex::decode(hex_secret.trim()).context("JWT_SECRET must be hex-encoded");
    }

    let path = PathBuf::from(
        env::var("JWT_SECRET_PATH").unwrap_or_else(|_| defaults::JWT_SECRET_PATH.into()),
    );

    if path.exists() {
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read JWT secret from {}", path.display()))?;
        return hex::decode(contents.trim()).context("Persisted JWT secret is not valid hex");
    }

    if environment.is_production() {
        warn!(
            path = %path.display(),
            "No JWT_SECRET configured in production; generating one"
        );
    }

    let secret = generate_jwt_secret();
    persist_jwt_secret(&path, &secret)?;
    info!(path = %path.display(), "Generated new JWT secret");
    Ok(secret)
}

/// Generate a random JWT signing secret
#[must_use]
pub fn generate_jwt_secret() -> Vec<u8> {
    let mut secret = vec![0u8; limits::JWT_SECRET_LEN];
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}

fn persist_jwt_secret(path: &Path, secret: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, hex::encode(secret))
        .with_context(|| format!("Failed to persist JWT secret to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("TESTING"),
            Environment::Testing
        );
        assert_eq!(
            Environment::from_str_or_default("anything-else"),
            Environment::Development
        );
    }

    #[test]
    fn test_generated_secret_length() {
        let secret = generate_jwt_secret();
        assert_eq!(secret.len(), limits::JWT_SECRET_LEN);
    }

    #[test]
    fn test_persist_and_reload_secret() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jwt.secret");
        let secret = generate_jwt_secret();
        persist_jwt_secret(&path, &secret).unwrap();

        let reloaded = hex::decode(std::fs::read_to_string(&path).unwrap().trim()).unwrap();
        assert_eq!(reloaded, secret);
    }
}
