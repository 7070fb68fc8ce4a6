//! Value objects shared across the domain layer.

pub mod identity;

pub use identity::Identity;
