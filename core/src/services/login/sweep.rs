//! Expiry sweeper for periodic eviction of stale login codes.
//!
//! Expiry is enforced lazily when a code is verified, so correctness never
//! depends on this sweeper; without it, codes that are requested but never
//! verified would sit in memory until replaced. The sweeper runs on a
//! tokio interval and drops every expired entry.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use super::store::CodeStore;

/// Configuration for the expiry sweeper
#[derive(Debug, Clone)]
pub struct CodeSweeperConfig {
    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to run the sweep at all
    pub enabled: bool,
}

impl Default for CodeSweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 300, // every 5 minutes
            enabled: true,
        }
    }
}

/// Periodic eviction of expired login codes
pub struct CodeSweeper {
    store: Arc<CodeStore>,
    config: CodeSweeperConfig,
}

impl CodeSweeper {
    /// Create a new sweeper over a shared store
    pub fn new(store: Arc<CodeStore>, config: CodeSweeperConfig) -> Self {
        Self { store, config }
    }

    /// Run a single sweep cycle, returning how many entries were evicted
    pub fn run_sweep(&self) -> usize {
        if !self.config.enabled {
            return 0;
        }

        let purged = self.store.purge_expired();
        if purged > 0 {
            info!(purged = purged, "Evicted expired login codes");
        } else {
            debug!("Expiry sweep found nothing to evict");
        }
        purged
    }

    /// Run the sweeper until the returned task is aborted.
    ///
    /// Spawns a background task ticking at the configured interval. The
    /// handle should be held by the process lifecycle owner and aborted
    /// on shutdown.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            if !self.config.enabled {
                return;
            }
            let mut ticker =
                tokio::time::interval(Duration::from_secs(self.config.interval_seconds.max(1)));
            // The first tick completes immediately; skip it so a fresh
            // process does not sweep an empty store.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                self.run_sweep();
            }
        })
    }
}
