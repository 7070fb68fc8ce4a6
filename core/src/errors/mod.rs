//! Domain-specific error types for login-code authentication.
//!
//! The taxonomy is deliberately narrow: verification never errors (its
//! outcome is the three-valued [`crate::services::login::VerifyOutcome`]),
//! so errors only surface from the collaborators around issuance.
//! User-facing messages belong to the presentation layer.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// The identity authorizer refused code issuance for this identity.
    #[error("Identity is not authorized to request a login code")]
    NotAuthorized,

    /// The notifier reported that it could not deliver the code.
    ///
    /// The pending entry is still created; see the service docs for the
    /// issuance/delivery coupling decision.
    #[error("Failed to deliver login code: {message}")]
    DeliveryFailure { message: String },
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),
}

pub type DomainResult<T> = Result<T, DomainError>;
