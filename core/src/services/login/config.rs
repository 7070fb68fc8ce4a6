//! Configuration for the login-code service

use crate::domain::entities::login_code::{DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};

/// Configuration for the login-code service
#[derive(Debug, Clone)]
pub struct LoginCodeConfig {
    /// Number of minutes before a login code expires
    pub code_expiration_minutes: i64,
    /// Maximum number of verification attempts allowed
    pub max_attempts: u8,
}

impl Default for LoginCodeConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}
