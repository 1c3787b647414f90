//! Exhaustive search over descending star windows.
//!
//! The search API stops returning results at a fixed cap, so a broad query
//! is split into star ranges small enough to be listed completely.

use rustc_hash::FxHashSet;

use rxcensus_core::config::DiscoveryConfig;
use rxcensus_core::constants::SEARCH_RESULT_CAP;
use rxcensus_core::errors::DiscoveryError;

use super::RepositorySearch;
use crate::manifest::RepositoryRecord;
use crate::rate::{
    wait_until_available, BucketKind, Clock, RateBudget, Sleeper, SystemClock, ThreadSleeper,
    WaitPolicy,
};

/// Consecutive rate-limited responses tolerated for one window.
const MAX_RATE_LIMITED_RETRIES: u32 = 3;

pub struct StarRangeSearch {
    min_stars: u64,
    max_stars: u64,
    window_step: u64,
    cap: u64,
    policy: WaitPolicy,
    sleeper: Box<dyn Sleeper>,
    clock: Box<dyn Clock>,
}

impl StarRangeSearch {
    pub fn from_config(config: &DiscoveryConfig) -> Self {
        Self {
            min_stars: config.effective_min_stars(),
            max_stars: config.effective_max_stars(),
            window_step: config.effective_window_step().max(1),
            cap: SEARCH_RESULT_CAP,
            policy: WaitPolicy::from_config(config),
            sleeper: Box::new(ThreadSleeper),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_cap(mut self, cap: u64) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_time(mut self, sleeper: Box<dyn Sleeper>, clock: Box<dyn Clock>) -> Self {
        self.sleeper = sleeper;
        self.clock = clock;
        self
    }

    /// Run `query` over every star window, highest first.
    ///
    /// A window whose total reaches the cap has its lower bound raised by one
    /// until it can be listed completely; each listed window is followed by
    /// the `window_step` stars below it, down to zero. Results are
    /// de-duplicated by repository identifier, first occurrence kept.
    ///
    /// A window interrupted by a rate-limited response is searched again once
    /// the budget is back.
    pub fn run(
        &self,
        source: &dyn RepositorySearch,
        budget: &dyn RateBudget,
        query: &str,
    ) -> Result<Vec<RepositoryRecord>, DiscoveryError> {
        let mut min = self.min_stars;
        let mut max = self.max_stars;
        let mut seen = FxHashSet::default();
        let mut found = Vec::new();
        let mut rate_limited = 0;

        loop {
            wait_until_available(
                budget,
                BucketKind::Search,
                &self.policy,
                self.sleeper.as_ref(),
                self.clock.as_ref(),
            )?;
            let page = match source.search(query, min, max) {
                Ok(page) => page,
                Err(DiscoveryError::RateLimited { url })
                    if rate_limited < MAX_RATE_LIMITED_RETRIES =>
                {
                    rate_limited += 1;
                    tracing::warn!(
                        query,
                        min,
                        max,
                        %url,
                        attempt = rate_limited,
                        "rate limited mid-window, retrying"
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };
            rate_limited = 0;
            tracing::info!(query, min, max, total = page.total_count, "searched star window");

            if page.total_count >= self.cap && min < max {
                min += 1;
                continue;
            }

            for record in page.items {
                if seen.insert(record.repository_id()) {
                    found.push(record);
                }
            }

            if min == 0 {
                break;
            }
            max = min - 1;
            min = min.saturating_sub(self.window_step);
        }

        tracing::info!(query, repositories = found.len(), "search complete");
        Ok(found)
    }
}
