//! Login code entity for email-based one-time authentication.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Maximum number of verification attempts allowed
pub const MAX_ATTEMPTS: u8 = 5;

/// Length of the login code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for login codes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// A pending login code awaiting verification.
///
/// Only the SHA-256 digest of the code is kept; the plaintext exists solely
/// in the return value of [`LoginCode::new`] and is handed to the notifier
/// for out-of-band delivery. The entity is unusable once it expires, once
/// its attempt budget reaches zero, or once it has been matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCode {
    /// SHA-256 hex digest of the plaintext code
    pub code_digest: String,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Verification attempts left before the code becomes unusable
    pub attempts_remaining: u8,
}

impl LoginCode {
    /// Creates a new login code with a cryptographically secure random
    /// 6-digit code.
    ///
    /// # Arguments
    ///
    /// * `expiration_minutes` - Number of minutes until the code expires
    ///
    /// # Returns
    ///
    /// The entity plus the plaintext code. This is the only place the
    /// plaintext is ever available.
    pub fn new(expiration_minutes: i64) -> (Self, String) {
        Self::new_with_attempts(expiration_minutes, MAX_ATTEMPTS)
    }

    /// Creates a new login code with a custom attempt budget.
    pub fn new_with_attempts(expiration_minutes: i64, max_attempts: u8) -> (Self, String) {
        let code = Self::generate_code();
        let now = Utc::now();

        let entity = Self {
            code_digest: Self::hash_code(&code),
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
            attempts_remaining: max_attempts,
        };
        (entity, code)
    }

    /// Generates a cryptographically secure random 6-digit code.
    ///
    /// The range is 100000..=999999 so the code is always six characters
    /// with no leading zeros.
    fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(100_000..=999_999);
        code.to_string()
    }

    /// Computes the SHA-256 hex digest of a plaintext code.
    pub fn hash_code(code: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(code.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Checks if the login code has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the attempt budget has been used up.
    pub fn is_exhausted(&self) -> bool {
        self.attempts_remaining == 0
    }

    /// Compares a supplied plaintext code against the stored digest.
    ///
    /// Uses a constant-time comparison to avoid leaking where the digests
    /// differ. Does not mutate the attempt budget; the store owns that
    /// transition.
    pub fn matches(&self, supplied: &str) -> bool {
        let supplied_digest = Self::hash_code(supplied);
        constant_time_eq(supplied_digest.as_bytes(), self.code_digest.as_bytes())
    }

    /// Records a mismatched verification attempt.
    ///
    /// Saturates at zero; the budget is never negative.
    pub fn register_mismatch(&mut self) {
        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
    }

    /// Gets the time remaining until expiration, or zero if expired.
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
