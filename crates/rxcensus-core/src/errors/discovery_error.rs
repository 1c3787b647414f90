//! Repository discovery errors.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Network error: {reason}")]
    Network { reason: String },

    #[error("HTTP {status} from {url}: {body}")]
    Http {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Rate limit reached while requesting {url}")]
    RateLimited { url: String },

    #[error("Unexpected response payload: {0}")]
    Decode(String),

    #[error("Rate budget still exhausted after waiting {waited_secs}s")]
    BudgetWaitExceeded { waited_secs: u64 },

    #[error("Discovery support not compiled in (enable the `github` feature)")]
    Unsupported,
}

impl ErrorCode for DiscoveryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::BudgetWaitExceeded { .. } | Self::RateLimited { .. } => {
                error_code::RATE_LIMITED
            }
            _ => error_code::DISCOVERY_ERROR,
        }
    }
}
