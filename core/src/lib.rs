//! # TimeSheet Core
//!
//! Core business logic and domain layer for the TimeSheet backend.
//! This crate contains the login-code authentication primitive: issuing
//! short-lived one-time codes bound to an email identity and verifying
//! them with bounded attempts and single-use consumption. Delivery (SMTP)
//! and HTTP routing live in outer crates and plug in through traits.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
