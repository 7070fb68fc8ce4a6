//! Domain entities representing core business objects.

pub mod login_code;

// Re-export commonly used types
pub use login_code::{LoginCode, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};
