//! Domain layer for plugconf
//!
//! Core configuration models, error types, and the ports that
//! infrastructure adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{ConfigError, ConfigResult};
