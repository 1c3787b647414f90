//! Logging for rxcensus.
//! `tracing` crate with an `EnvFilter` read from `RXCENSUS_LOG`.

pub mod setup;

pub use setup::init_tracing;
