//! Tests for the star-window search.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use rxcensus_core::config::DiscoveryConfig;
use rxcensus_core::errors::DiscoveryError;
use rxcensus_discovery::rate::{Bucket, Clock, RateBudget, RateStatus, Sleeper};
use rxcensus_discovery::{RepositoryRecord, RepositorySearch, SearchPage, StarRangeSearch};

fn record(owner: &str, stars: u64) -> RepositoryRecord {
    RepositoryRecord {
        id: stars,
        full_name: format!("{owner}/lib"),
        owner: owner.to_string(),
        name: "lib".to_string(),
        stargazers_count: stars,
        forks_count: 0,
        language: None,
        size: 0,
    }
}

/// Answers like the real API: true totals, items capped and sorted by stars.
struct Corpus {
    repos: Vec<RepositoryRecord>,
    cap: usize,
    windows: RefCell<Vec<(u64, u64)>>,
}

impl RepositorySearch for Corpus {
    fn search(&self, _query: &str, min: u64, max: u64) -> Result<SearchPage, DiscoveryError> {
        self.windows.borrow_mut().push((min, max));
        let mut hits: Vec<RepositoryRecord> = self
            .repos
            .iter()
            .filter(|r| (min..=max).contains(&r.stargazers_count))
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
        let total_count = hits.len() as u64;
        hits.truncate(self.cap);
        Ok(SearchPage {
            total_count,
            items: hits,
        })
    }
}

/// Returns the same repository for every window.
struct Repeating;

impl RepositorySearch for Repeating {
    fn search(&self, _query: &str, _min: u64, _max: u64) -> Result<SearchPage, DiscoveryError> {
        Ok(SearchPage {
            total_count: 1,
            items: vec![record("same", 50)],
        })
    }
}

/// Fails the first `failures` calls as rate limited, then answers from `inner`.
struct Throttled {
    inner: Corpus,
    failures: Cell<u32>,
}

impl RepositorySearch for Throttled {
    fn search(&self, query: &str, min: u64, max: u64) -> Result<SearchPage, DiscoveryError> {
        if self.failures.get() > 0 {
            self.failures.set(self.failures.get() - 1);
            return Err(DiscoveryError::RateLimited {
                url: "https://api.github.com/search/repositories".to_string(),
            });
        }
        self.inner.search(query, min, max)
    }
}

struct Budget {
    search_remaining: u64,
    polls: Cell<usize>,
}

impl RateBudget for Budget {
    fn remaining(&self) -> Result<RateStatus, DiscoveryError> {
        self.polls.set(self.polls.get() + 1);
        Ok(RateStatus {
            search: Bucket {
                remaining: self.search_remaining,
                reset_at: 1_000_000,
            },
            core: Bucket {
                remaining: 5000,
                reset_at: 0,
            },
        })
    }
}

fn budget(search_remaining: u64) -> Budget {
    Budget {
        search_remaining,
        polls: Cell::new(0),
    }
}

struct NoTime;

impl Clock for NoTime {
    fn now(&self) -> u64 {
        0
    }
}

impl Sleeper for NoTime {
    fn sleep(&self, _duration: Duration) {}
}

fn config(min: u64, max: u64) -> DiscoveryConfig {
    DiscoveryConfig {
        min_stars: Some(min),
        max_stars: Some(max),
        window_step: Some(10),
        poll_interval_secs: Some(60),
        max_wait_secs: Some(120),
        ..Default::default()
    }
}

fn search(min: u64, max: u64, cap: u64) -> StarRangeSearch {
    StarRangeSearch::from_config(&config(min, max))
        .with_cap(cap)
        .with_time(Box::new(NoTime), Box::new(NoTime))
}

#[test]
fn test_finds_every_repository_despite_cap() {
    let stars = [500, 400, 300, 200, 15, 12, 5, 3];
    let corpus = Corpus {
        repos: stars.iter().enumerate().map(|(i, &s)| record(&format!("o{i}"), s)).collect(),
        cap: 3,
        windows: RefCell::new(Vec::new()),
    };
    let found = search(10, 1000, 3).run(&corpus, &budget(30), "rxjava").unwrap();
    let got: Vec<u64> = found.iter().map(|r| r.stargazers_count).collect();
    assert_eq!(got, stars.to_vec());

    let windows = corpus.windows.borrow();
    assert_eq!(windows[0], (10, 1000));
    assert_eq!(windows[1], (11, 1000));
    assert_eq!(*windows.last().unwrap(), (0, 0));
}

#[test]
fn test_uncapped_window_steps_down_to_zero() {
    let corpus = Corpus {
        repos: vec![record("a", 25), record("b", 8)],
        cap: 1000,
        windows: RefCell::new(Vec::new()),
    };
    let found = search(10, 1000, 1000).run(&corpus, &budget(30), "rxdart").unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(*corpus.windows.borrow(), vec![(10, 1000), (0, 9)]);
}

#[test]
fn test_results_deduplicated_by_repository() {
    let budget = budget(30);
    let found = search(10, 1000, 1000).run(&Repeating, &budget, "rxswift").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(budget.polls.get(), 2);
}

#[test]
fn test_exhausted_budget_aborts_search() {
    let corpus = Corpus {
        repos: vec![record("a", 25)],
        cap: 1000,
        windows: RefCell::new(Vec::new()),
    };
    let err = search(10, 1000, 1000).run(&corpus, &budget(0), "rxkotlin").unwrap_err();
    assert!(matches!(err, DiscoveryError::BudgetWaitExceeded { waited_secs: 120 }));
    assert!(corpus.windows.borrow().is_empty());
}

#[test]
fn test_rate_limited_window_is_retried() {
    let throttled = Throttled {
        inner: Corpus {
            repos: vec![record("a", 25), record("b", 8)],
            cap: 1000,
            windows: RefCell::new(Vec::new()),
        },
        failures: Cell::new(2),
    };
    let budget = budget(30);
    let found = search(10, 1000, 1000).run(&throttled, &budget, "rxjava").unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(*throttled.inner.windows.borrow(), vec![(10, 1000), (0, 9)]);
    assert_eq!(budget.polls.get(), 4);
}

#[test]
fn test_persistent_rate_limit_gives_up() {
    let throttled = Throttled {
        inner: Corpus {
            repos: vec![record("a", 25)],
            cap: 1000,
            windows: RefCell::new(Vec::new()),
        },
        failures: Cell::new(u32::MAX),
    };
    let budget = budget(30);
    let err = search(10, 1000, 1000).run(&throttled, &budget, "rxjs").unwrap_err();
    assert!(matches!(err, DiscoveryError::RateLimited { .. }));
    assert_eq!(budget.polls.get(), 4);
    assert!(throttled.inner.windows.borrow().is_empty());
}
