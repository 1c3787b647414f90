//! rxcensus-discovery: finding and fetching the repositories to measure.
//!
//! - `rate`: rate-budget polling with bounded, injectable waiting
//! - `search`: exhaustive star-window search and the GitHub client (feature `github`)
//! - `manifest`: discovered repositories per dialect
//! - `clone`: bounded per-dialect cloning and allow-list generation

pub mod clone;
pub mod manifest;
pub mod rate;
pub mod search;

pub use clone::{allow_list_from_clones, ClonePlan, CloneReport, CloneTarget, Cloner, Git2Cloner};
pub use manifest::{RepositoryManifest, RepositoryRecord};
pub use rate::{
    wait_until_available, Bucket, BucketKind, Clock, RateBudget, RateStatus, Sleeper, WaitPolicy,
};
pub use search::{GitHubClient, RepositorySearch, SearchPage, StarRangeSearch};
