//! Rate-budget capability for the search API.
//!
//! The budget source, the clock and the sleeper are all injected, so waiting
//! is bounded and testable without real time passing.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use rxcensus_core::config::DiscoveryConfig;
use rxcensus_core::errors::DiscoveryError;

/// One request allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub remaining: u64,
    /// Unix seconds at which `remaining` refills.
    pub reset_at: u64,
}

impl Bucket {
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// Both allowances the search API enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateStatus {
    pub search: Bucket,
    pub core: Bucket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketKind {
    Search,
    Core,
}

impl RateStatus {
    pub fn bucket(&self, kind: BucketKind) -> Bucket {
        match kind {
            BucketKind::Search => self.search,
            BucketKind::Core => self.core,
        }
    }
}

/// Source of the current rate status.
pub trait RateBudget {
    fn remaining(&self) -> Result<RateStatus, DiscoveryError>;
}

pub trait Clock {
    /// Current time in unix seconds.
    fn now(&self) -> u64;
}

pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Bounds on waiting for an exhausted bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Longest single sleep before re-polling.
    pub poll_interval: Duration,
    /// Total sleep allowed for one call to [`wait_until_available`].
    pub max_wait: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self::from_config(&DiscoveryConfig::default())
    }
}

impl WaitPolicy {
    pub fn from_config(config: &DiscoveryConfig) -> Self {
        Self {
            poll_interval: Duration::from_secs(config.effective_poll_interval_secs()),
            max_wait: Duration::from_secs(config.effective_max_wait_secs()),
        }
    }
}

/// Block until `kind` has budget left, sleeping in steps of at most
/// `poll_interval` and never longer than the time to the advertised reset.
///
/// Returns the status that ended the wait. Fails with
/// [`DiscoveryError::BudgetWaitExceeded`] once `max_wait` has been slept.
pub fn wait_until_available(
    budget: &dyn RateBudget,
    kind: BucketKind,
    policy: &WaitPolicy,
    sleeper: &dyn Sleeper,
    clock: &dyn Clock,
) -> Result<RateStatus, DiscoveryError> {
    let mut waited = Duration::ZERO;
    loop {
        let status = budget.remaining()?;
        let bucket = status.bucket(kind);
        if !bucket.is_exhausted() {
            tracing::debug!(
                search = status.search.remaining,
                core = status.core.remaining,
                "rate budget available"
            );
            return Ok(status);
        }
        if waited >= policy.max_wait {
            return Err(DiscoveryError::BudgetWaitExceeded {
                waited_secs: waited.as_secs(),
            });
        }

        let until_reset = Duration::from_secs(bucket.reset_at.saturating_sub(clock.now()));
        // A reset already in the past still gets a one-second pause so a
        // stale status is not polled in a tight loop.
        let step = until_reset
            .min(policy.poll_interval)
            .min(policy.max_wait - waited)
            .max(Duration::from_secs(1));
        tracing::info!(
            bucket = ?kind,
            reset_in_secs = until_reset.as_secs(),
            sleep_secs = step.as_secs(),
            "rate budget exhausted, waiting"
        );
        sleeper.sleep(step);
        waited += step;
    }
}
