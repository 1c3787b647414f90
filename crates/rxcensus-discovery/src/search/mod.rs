//! Repository search.

pub mod github;
pub mod star_range;

pub use github::GitHubClient;
pub use star_range::StarRangeSearch;

use rxcensus_core::errors::DiscoveryError;

use crate::manifest::RepositoryRecord;

/// Results of one query over one star window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    /// Matches the API reports for the window, which may exceed what it returns.
    pub total_count: u64,
    pub items: Vec<RepositoryRecord>,
}

/// A hosted repository search.
pub trait RepositorySearch {
    /// Repositories matching `query` with `min_stars..=max_stars` stars, sorted
    /// by stars, up to the API's result cap.
    fn search(&self, query: &str, min_stars: u64, max_stars: u64)
        -> Result<SearchPage, DiscoveryError>;
}
