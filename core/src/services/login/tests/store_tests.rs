//! Unit tests for the code store state machine

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::domain::entities::login_code::{CODE_LENGTH, MAX_ATTEMPTS};
use crate::services::login::{CodeStore, LoginCodeConfig, VerifyOutcome};

fn store_with_expiration(minutes: i64) -> CodeStore {
    CodeStore::new(LoginCodeConfig {
        code_expiration_minutes: minutes,
        ..LoginCodeConfig::default()
    })
}

#[test]
fn test_issue_then_verify_accepts() {
    let store = CodeStore::with_defaults();

    let issued = store.issue("worker@example.com");
    assert_eq!(issued.code.len(), CODE_LENGTH);

    let outcome = store.verify("worker@example.com", &issued.code);
    assert_eq!(outcome, VerifyOutcome::Accepted);
}

#[test]
fn test_accepted_is_one_time() {
    let store = CodeStore::with_defaults();
    let issued = store.issue("worker@example.com");

    assert_eq!(
        store.verify("worker@example.com", &issued.code),
        VerifyOutcome::Accepted
    );
    // The entry is gone; the same code must never be accepted twice.
    assert_eq!(
        store.verify("worker@example.com", &issued.code),
        VerifyOutcome::Rejected
    );
}

#[test]
fn test_unknown_identity_is_rejected() {
    let store = CodeStore::with_defaults();
    assert_eq!(
        store.verify("never-issued@x.com", "123456"),
        VerifyOutcome::Rejected
    );
}

#[test]
fn test_mismatch_decrements_attempts() {
    let store = CodeStore::with_defaults();
    store.issue("worker@example.com");

    assert_eq!(
        store.verify("worker@example.com", "000000"),
        VerifyOutcome::Rejected
    );
    assert_eq!(
        store.remaining_attempts("worker@example.com"),
        Some(MAX_ATTEMPTS - 1)
    );
}

#[test]
fn test_attempt_budget_exhaustion() {
    let store = CodeStore::with_defaults();
    let issued = store.issue("worker@example.com");

    for _ in 0..MAX_ATTEMPTS {
        assert_eq!(
            store.verify("worker@example.com", "000000"),
            VerifyOutcome::Rejected
        );
    }

    // Budget exhausted: even the correct code is rejected, and the entry
    // is purged rather than left at zero.
    assert_eq!(
        store.verify("worker@example.com", &issued.code),
        VerifyOutcome::Rejected
    );
    assert_eq!(store.remaining_attempts("worker@example.com"), None);
    assert_eq!(
        store.verify("worker@example.com", &issued.code),
        VerifyOutcome::Rejected
    );
}

#[test]
fn test_expired_code_returns_expired() {
    let store = store_with_expiration(0);
    let issued = store.issue("worker@example.com");
    thread::sleep(Duration::from_millis(10));

    assert_eq!(
        store.verify("worker@example.com", &issued.code),
        VerifyOutcome::Expired
    );
    // Entry was deleted on expiry detection.
    assert_eq!(
        store.verify("worker@example.com", &issued.code),
        VerifyOutcome::Rejected
    );
}

#[test]
fn test_expiry_dominates_attempts() {
    let store = store_with_expiration(0);
    let issued = store.issue("worker@example.com");
    thread::sleep(Duration::from_millis(10));

    // Full attempt budget left and the code is correct, yet the expiry
    // window has passed.
    assert_eq!(
        store.remaining_attempts("worker@example.com"),
        Some(MAX_ATTEMPTS)
    );
    assert_eq!(
        store.verify("worker@example.com", &issued.code),
        VerifyOutcome::Expired
    );
}

#[test]
fn test_reissue_invalidates_prior_code() {
    let store = CodeStore::with_defaults();
    let first = store.issue("worker@example.com");
    // Re-issue until the replacement differs from the original; two
    // identical 6-digit draws would make the rejection below ambiguous.
    let second = loop {
        let issued = store.issue("worker@example.com");
        if issued.code != first.code {
            break issued;
        }
    };

    assert_eq!(
        store.verify("worker@example.com", &first.code),
        VerifyOutcome::Rejected
    );
    // A mismatch against the second code burned one attempt.
    assert_eq!(
        store.remaining_attempts("worker@example.com"),
        Some(MAX_ATTEMPTS - 1)
    );
    assert_eq!(
        store.verify("worker@example.com", &second.code),
        VerifyOutcome::Accepted
    );
}

#[test]
fn test_reissue_resets_attempt_budget() {
    let store = CodeStore::with_defaults();
    store.issue("worker@example.com");
    store.verify("worker@example.com", "000000");
    store.verify("worker@example.com", "111111");

    let issued = store.issue("worker@example.com");
    assert_eq!(
        store.remaining_attempts("worker@example.com"),
        Some(MAX_ATTEMPTS)
    );
    assert_eq!(
        store.verify("worker@example.com", &issued.code),
        VerifyOutcome::Accepted
    );
}

#[test]
fn test_identity_normalization() {
    let store = CodeStore::with_defaults();
    let issued = store.issue("Foo@Bar.com");

    assert_eq!(
        store.verify("  foo@bar.COM  ", &issued.code),
        VerifyOutcome::Accepted
    );
}

#[test]
fn test_identities_are_independent() {
    let store = CodeStore::with_defaults();
    let a = store.issue("a@example.com");
    let b = store.issue("b@example.com");

    assert_eq!(store.verify("a@example.com", &b.code), VerifyOutcome::Rejected);
    assert_eq!(store.verify("b@example.com", &b.code), VerifyOutcome::Accepted);
    assert_eq!(store.verify("a@example.com", &a.code), VerifyOutcome::Accepted);
}

#[test]
fn test_login_scenario() {
    let store = CodeStore::with_defaults();
    let issued = store.issue("a@b.com");

    assert_eq!(store.verify("a@b.com", "000000"), VerifyOutcome::Rejected);
    assert_eq!(store.remaining_attempts("a@b.com"), Some(MAX_ATTEMPTS - 1));
    assert_eq!(store.verify("a@b.com", &issued.code), VerifyOutcome::Accepted);
    assert_eq!(store.verify("a@b.com", &issued.code), VerifyOutcome::Rejected);
}

#[test]
fn test_code_exists() {
    let store = CodeStore::with_defaults();
    assert!(!store.code_exists("worker@example.com"));

    store.issue("worker@example.com");
    assert!(store.code_exists("worker@example.com"));

    store.clear("worker@example.com");
    assert!(!store.code_exists("worker@example.com"));
}

#[test]
fn test_purge_expired_only_removes_stale_entries() {
    let expired = store_with_expiration(0);
    expired.issue("stale@example.com");

    let store = CodeStore::with_defaults();
    store.issue("fresh@example.com");

    thread::sleep(Duration::from_millis(10));

    assert_eq!(expired.purge_expired(), 1);
    assert!(expired.is_empty());

    assert_eq!(store.purge_expired(), 0);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_concurrent_mismatches_never_under_decrement() {
    let store = Arc::new(CodeStore::with_defaults());
    let issued = store.issue("worker@example.com");

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.verify("worker@example.com", "000000"))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), VerifyOutcome::Rejected);
    }

    // Ten parallel mismatches against a budget of five: the entry is
    // either at zero or already purged, and the correct code no longer
    // gets in.
    let remaining = store.remaining_attempts("worker@example.com");
    assert!(remaining == Some(0) || remaining.is_none());
    assert_eq!(
        store.verify("worker@example.com", &issued.code),
        VerifyOutcome::Rejected
    );
}

#[test]
fn test_concurrent_issue_and_verify_stay_consistent() {
    let store = Arc::new(CodeStore::with_defaults());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let identity = format!("worker{}@example.com", i);
                let issued = store.issue(&identity);
                assert_eq!(store.verify(&identity, &issued.code), VerifyOutcome::Accepted);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(store.is_empty());
}
