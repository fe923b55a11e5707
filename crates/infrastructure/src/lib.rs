//! Story Spoiler Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus environment configuration.

pub mod adapters;
pub mod config;
pub mod testing;

pub use adapters::ReqwestHttpClient;
pub use config::{ConfigError, SuiteConfig, SuiteEnv, parse_base_url};
pub use testing::TestRunner;
