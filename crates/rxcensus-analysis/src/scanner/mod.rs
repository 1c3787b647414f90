//! Scanner subsystem: decides which files in the cloned trees are in scope.
//!
//! Produces `RepositoryFile` values, the unit of work consumed by the matcher.

pub mod classifier;
pub mod types;

pub use classifier::FileClassifier;
pub use types::RepositoryFile;
