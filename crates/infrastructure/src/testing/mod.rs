//! Response testing module.
//!
//! Provides test runner functionality for executing assertions
//! against HTTP responses.

mod runner;

pub use runner::TestRunner;
