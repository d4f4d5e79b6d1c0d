//! Shared utilities for stakegov.

pub mod logging;

pub use logging::{init_logging, LogFormat};
