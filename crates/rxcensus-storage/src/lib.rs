//! rxcensus-storage: everything rxcensus reads from or writes to the index
//! directory.
//!
//! - `layout`: file naming inside the index directory
//! - `json`: catalog, allow-list, usage and statistics documents
//! - `csv`: flattened exports of the usage and statistics tables
//! - `file_list`: per-dialect lists of in-scope files

pub mod csv;
pub mod file_list;
pub mod json;
pub mod layout;

pub use layout::IndexLayout;
