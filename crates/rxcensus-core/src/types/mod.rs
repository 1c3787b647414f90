//! Domain types shared by every rxcensus crate.

pub mod allow_list;
pub mod catalog;
pub mod dialect;
pub mod identifiers;
pub mod usage;

pub use allow_list::AllowList;
pub use catalog::OperatorCatalog;
pub use dialect::{Dialect, MatchStrategy, PathRule};
pub use identifiers::RepositoryId;
pub use usage::{UsageRow, UsageTable};

pub use rustc_hash::{FxHashMap, FxHashSet};
