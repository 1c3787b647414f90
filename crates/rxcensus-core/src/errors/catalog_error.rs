//! Operator catalog and allow-list errors.
//!
//! These are structural defects in run inputs. They are never downgraded:
//! continuing would silently corrupt the aggregate statistics.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown dialect '{name}' in {source_name}")]
    UnknownDialect { name: String, source_name: String },

    #[error("Malformed {source_name}: {message}")]
    Malformed { source_name: String, message: String },

    #[error("Dialect {dialect} has no operators in the catalog")]
    MissingDialect { dialect: String },

    #[error("Operator '{operator}' is not in the {dialect} catalog")]
    UnknownOperator { dialect: String, operator: String },

    #[error("Operator name '{operator}' is not a plain identifier")]
    InvalidOperatorName { operator: String },
}

impl ErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownDialect { .. } => error_code::UNKNOWN_DIALECT,
            _ => error_code::CATALOG_ERROR,
        }
    }
}
