//! # Configuration
//!
//! Client configuration: where the backend lives, where the session is kept
//! and how logs are written.

pub mod client;

pub use client::{
    ApiConfig, ClientConfig, ConfigError, ConfigFormat, DEFAULT_BASE_URL, LogFormat, LoggingConfig,
    StorageConfig,
};
