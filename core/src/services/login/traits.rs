//! Traits for authorizer and notifier integration

use async_trait::async_trait;

use crate::domain::value_objects::Identity;

/// Trait for the external identity directory.
///
/// Answers whether an identity may request a login code (an active,
/// timesheet-eligible account). The service gates issuance behind this
/// check; the store itself never consults it.
#[async_trait]
pub trait IdentityAuthorizer: Send + Sync {
    /// Check whether the identity is allowed to authenticate
    async fn authorize(&self, identity: &Identity) -> Result<bool, String>;
}

/// Trait for out-of-band code delivery (email in this domain).
#[async_trait]
pub trait CodeNotifier: Send + Sync {
    /// Deliver a plaintext login code, returning a provider message ID
    async fn deliver_code(&self, identity: &Identity, code: &str) -> Result<String, String>;
}
