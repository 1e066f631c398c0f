// ABOUTME: Application constants and default configuration values
// ABOUTME: Centralizes ports, limits, and service identifiers used across modules
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! Application-wide constants
//!
//! Named values shared across modules so defaults live in one place.

/// Service identifiers
pub mod service {
    /// Service name used in logs and the health endpoint
    pub const NAME: &str = "studio-server";
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8080;

    /// Default SQLite database URL
    pub const DATABASE_URL: &str = "sqlite:data/studio.db";

    /// Default directory for uploaded photos
    pub const PHOTO_STORAGE_ROOT: &str = "data/uploads";

    /// Default path where a generated JWT secret is persisted
    pub const JWT_SECRET_PATH: &str = "data/jwt.secret";

    /// Default session duration when a booking omits one
    pub const SESSION_DURATION_MINUTES: i32 = 60;

    /// JWT expiry for trainer logins
    pub const TOKEN_EXPIRY_HOURS: i64 = 24 * 7;
}

/// Hard limits enforced by validation
pub mod limits {
    /// Maximum photos accepted in a single upload group
    pub const MAX_PHOTOS_PER_GROUP: usize = 5;

    /// Maximum accepted size of a single uploaded photo in bytes
    pub const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;

    /// Maximum accepted size of a whole photo upload request in bytes
    pub const UPLOAD_BODY_LIMIT_BYTES: usize = 50 * 1024 * 1024;

    /// Minimum trainer password length
    pub const MIN_PASSWORD_LENGTH: usize = 8;

    /// Number of upcoming sessions shown on the dashboard
    pub const DASHBOARD_UPCOMING_LIMIT: usize = 5;

    /// Number of bytes in a generated JWT secret
    pub const JWT_SECRET_LEN: usize = 32;
}
