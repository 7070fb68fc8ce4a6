//! Main login-code service implementation

use std::sync::Arc;

use crate::domain::value_objects::Identity;
use crate::errors::{AuthError, DomainError, DomainResult};

use super::store::CodeStore;
use super::traits::{CodeNotifier, IdentityAuthorizer};
use super::types::{RequestCodeResult, VerifyOutcome};

/// Service for the email login-code workflow.
///
/// Composes the [`CodeStore`] with the two external collaborators: the
/// identity authorizer (user directory) and the code notifier (email
/// delivery). Request handlers talk to this service; only tests and the
/// expiry sweeper touch the store directly.
pub struct LoginCodeService<A: IdentityAuthorizer, N: CodeNotifier> {
    /// Directory check gating issuance
    authorizer: Arc<A>,
    /// Out-of-band code delivery
    notifier: Arc<N>,
    /// Pending-code registry
    store: Arc<CodeStore>,
}

impl<A: IdentityAuthorizer, N: CodeNotifier> LoginCodeService<A, N> {
    /// Create a new login-code service
    pub fn new(authorizer: Arc<A>, notifier: Arc<N>, store: Arc<CodeStore>) -> Self {
        Self {
            authorizer,
            notifier,
            store,
        }
    }

    /// Request a login code for an identity.
    ///
    /// This method:
    /// 1. Asks the identity authorizer whether the identity may authenticate
    /// 2. Issues a fresh code, replacing any pending one
    /// 3. Hands the plaintext to the notifier for delivery
    ///
    /// # Arguments
    ///
    /// * `identity` - Raw identity string (email); normalized internally
    ///
    /// # Returns
    ///
    /// * `Ok(RequestCodeResult)` - Delivery message ID and code expiry
    /// * `Err(DomainError)` - If the authorizer refuses or delivery fails
    ///
    /// Issuance and delivery are not transactional: when the notifier
    /// fails, the pending entry has already been created and stays
    /// verifiable until it expires or is replaced.
    pub async fn request_code(&self, identity: &str) -> DomainResult<RequestCodeResult> {
        let normalized = Identity::new(identity);

        let authorized = self
            .authorizer
            .authorize(&normalized)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Authorizer unavailable: {}", e),
            })?;
        if !authorized {
            tracing::warn!(
                identity = %normalized.masked(),
                event = "code_request_refused",
                "Identity is not authorized to request a login code"
            );
            return Err(AuthError::NotAuthorized.into());
        }

        let issued = self.store.issue(identity);

        let message_id = self
            .notifier
            .deliver_code(&normalized, &issued.code)
            .await
            .map_err(|e| {
                tracing::error!(
                    identity = %normalized.masked(),
                    error = %e,
                    event = "code_delivery_failed",
                    "Failed to deliver login code"
                );
                AuthError::DeliveryFailure { message: e }
            })?;

        tracing::info!(
            identity = %normalized.masked(),
            event = "code_delivered",
            message_id = %message_id,
            "Login code delivered"
        );

        Ok(RequestCodeResult {
            message_id,
            expires_at: issued.expires_at,
        })
    }

    /// Verify a supplied login code for an identity.
    ///
    /// Delegates to the store; the outcome is total (never errors) and
    /// the store already logs the per-outcome detail.
    pub fn verify_code(&self, identity: &str, code: &str) -> VerifyOutcome {
        self.store.verify(identity, code)
    }

    /// Access the underlying store (for the sweeper and diagnostics)
    pub fn store(&self) -> &Arc<CodeStore> {
        &self.store
    }
}
