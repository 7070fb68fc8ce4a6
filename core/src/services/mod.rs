//! Business services containing domain logic and use cases.

pub mod login;

// Re-export commonly used types
pub use login::{
    CodeNotifier, CodeStore, CodeSweeper, CodeSweeperConfig, IdentityAuthorizer, IssuedCode,
    LoginCodeConfig, LoginCodeService, RequestCodeResult, VerifyOutcome,
};
