//! In-memory store of pending login codes.
//!
//! The store is the authoritative registry mapping a normalized identity to
//! its pending code. It owns the full lifecycle: created on issuance,
//! decremented on mismatch, deleted on success, expiry, or exhaustion.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, PoisonError};

use crate::domain::entities::login_code::LoginCode;
use crate::domain::value_objects::Identity;

use super::config::LoginCodeConfig;
use super::types::{IssuedCode, VerifyOutcome};

/// Number of lock shards in the store.
///
/// Read-modify-write for one identity always lands on one shard, so
/// same-identity operations serialize while different identities usually
/// proceed on disjoint locks.
const SHARD_COUNT: usize = 16;

type Shard = Mutex<HashMap<String, LoginCode>>;

/// Authoritative in-memory registry of pending login codes.
///
/// Construct one instance at process start and share it (behind `Arc`)
/// across request handlers; tests create isolated instances. Operations
/// are synchronous and bounded-time, and no lock is held across I/O.
///
/// Multi-process deployments that need shared code state should put an
/// external store behind the same issue/verify interface instead.
pub struct CodeStore {
    shards: Vec<Shard>,
    config: LoginCodeConfig,
}

impl CodeStore {
    /// Create a new store with the given configuration
    pub fn new(config: LoginCodeConfig) -> Self {
        let shards = (0..SHARD_COUNT)
            .map(|_| Mutex::new(HashMap::new()))
            .collect();
        Self { shards, config }
    }

    /// Create a new store with default configuration
    pub fn with_defaults() -> Self {
        Self::new(LoginCodeConfig::default())
    }

    fn shard_for(&self, identity: &Identity) -> &Shard {
        let mut hasher = DefaultHasher::new();
        identity.as_str().hash(&mut hasher);
        &self.shards[hasher.finish() as usize % SHARD_COUNT]
    }

    /// Issue a fresh login code for an identity.
    ///
    /// Generates a random 6-digit code, stores its digest with a full
    /// attempt budget and expiry window, and returns the plaintext for
    /// out-of-band delivery. Any prior pending code for the same
    /// normalized identity is silently replaced and becomes permanently
    /// unusable. This operation cannot fail.
    pub fn issue(&self, identity: &str) -> IssuedCode {
        let identity = Identity::new(identity);
        let (entity, code) = LoginCode::new_with_attempts(
            self.config.code_expiration_minutes,
            self.config.max_attempts,
        );
        let expires_at = entity.expires_at;

        let mut entries = self
            .shard_for(&identity)
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let replaced = entries.insert(identity.as_str().to_string(), entity).is_some();
        drop(entries);

        tracing::info!(
            identity = %identity.masked(),
            event = "code_issued",
            replaced_pending = replaced,
            "Issued login code"
        );

        IssuedCode { code, expires_at }
    }

    /// Verify a supplied code for an identity.
    ///
    /// Returns one of the three [`VerifyOutcome`] values; this method
    /// never panics and never errors. An unknown identity and an
    /// exhausted attempt budget both surface as
    /// [`VerifyOutcome::Rejected`] so the caller learns nothing about
    /// whether a code was ever issued. Expiry is checked first and
    /// dominates the attempt budget.
    pub fn verify(&self, identity: &str, supplied: &str) -> VerifyOutcome {
        let identity = Identity::new(identity);
        let mut entries = self
            .shard_for(&identity)
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let entry = match entries.get_mut(identity.as_str()) {
            Some(entry) => entry,
            None => {
                tracing::warn!(
                    identity = %identity.masked(),
                    event = "code_verification_unknown",
                    "Verification attempt for identity with no pending code"
                );
                return VerifyOutcome::Rejected;
            }
        };

        if entry.is_expired() {
            entries.remove(identity.as_str());
            tracing::warn!(
                identity = %identity.masked(),
                event = "code_expired",
                "Login code expired before verification"
            );
            return VerifyOutcome::Expired;
        }

        if entry.is_exhausted() {
            // The zero-attempt state is purged, not left to linger.
            entries.remove(identity.as_str());
            tracing::warn!(
                identity = %identity.masked(),
                event = "code_attempts_exhausted",
                "Login code attempt budget exhausted"
            );
            return VerifyOutcome::Rejected;
        }

        if entry.matches(supplied) {
            // One-time use: a successful verification is terminal.
            entries.remove(identity.as_str());
            tracing::info!(
                identity = %identity.masked(),
                event = "code_verified",
                "Login code successfully verified"
            );
            return VerifyOutcome::Accepted;
        }

        entry.register_mismatch();
        let remaining = entry.attempts_remaining;
        drop(entries);

        tracing::warn!(
            identity = %identity.masked(),
            event = "code_mismatch",
            attempts_remaining = remaining,
            "Login code verification failed"
        );
        VerifyOutcome::Rejected
    }

    /// Check whether a live (unexpired) code is pending for an identity
    pub fn code_exists(&self, identity: &str) -> bool {
        let identity = Identity::new(identity);
        let entries = self
            .shard_for(&identity)
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries
            .get(identity.as_str())
            .map(|entry| !entry.is_expired())
            .unwrap_or(false)
    }

    /// Get the remaining verification attempts for a pending code
    pub fn remaining_attempts(&self, identity: &str) -> Option<u8> {
        let identity = Identity::new(identity);
        let entries = self
            .shard_for(&identity)
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries
            .get(identity.as_str())
            .map(|entry| entry.attempts_remaining)
    }

    /// Remove any pending code for an identity
    pub fn clear(&self, identity: &str) {
        let identity = Identity::new(identity);
        self.shard_for(&identity)
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(identity.as_str());
    }

    /// Evict every expired entry, returning how many were removed.
    ///
    /// Expiry is already enforced lazily at verification time; this sweep
    /// only caps memory growth from codes that are never verified.
    pub fn purge_expired(&self) -> usize {
        let mut purged = 0;
        for shard in &self.shards {
            let mut entries = shard.lock().unwrap_or_else(PoisonError::into_inner);
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired());
            purged += before - entries.len();
        }
        purged
    }

    /// Number of pending entries, expired or not
    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| shard.lock().unwrap_or_else(PoisonError::into_inner).len())
            .sum()
    }

    /// Whether the store holds no pending entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CodeStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}
