//! Types for login-code service results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of verifying a supplied login code.
///
/// Every verification call maps to exactly one of these; there is no
/// separate "identity unknown" signal, which is folded into [`Rejected`]
/// so callers cannot probe for account existence.
///
/// [`Rejected`]: VerifyOutcome::Rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerifyOutcome {
    /// The code matched. The entry is consumed; the same code can never
    /// be accepted again.
    Accepted,
    /// The code's expiry window has passed. The caller should prompt the
    /// user to request a new code.
    Expired,
    /// Wrong code, unknown identity, or exhausted attempt budget.
    Rejected,
}

/// A freshly issued login code, returned by [`CodeStore::issue`].
///
/// [`CodeStore::issue`]: super::CodeStore::issue
#[derive(Debug, Clone)]
pub struct IssuedCode {
    /// The plaintext 6-digit code; never stored, only delivered
    pub code: String,
    /// When the code expires
    pub expires_at: DateTime<Utc>,
}

/// Result of a successful code request through the service
#[derive(Debug, Clone)]
pub struct RequestCodeResult {
    /// The delivery message ID from the notifier
    pub message_id: String,
    /// When the delivered code expires
    pub expires_at: DateTime<Utc>,
}
