//! Login-code service module for email-based one-time authentication.
//!
//! This module provides the complete login-code workflow:
//! - Code generation and hashed in-memory storage
//! - Verification with expiry, attempt tracking, and single-use consumption
//! - Integration points for the identity authorizer and code notifier
//! - Periodic eviction of expired entries

mod config;
mod service;
mod store;
mod sweep;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::LoginCodeConfig;
pub use service::LoginCodeService;
pub use store::CodeStore;
pub use sweep::{CodeSweeper, CodeSweeperConfig};
pub use traits::{CodeNotifier, IdentityAuthorizer};
pub use types::{IssuedCode, RequestCodeResult, VerifyOutcome};
