//! Story Spoiler Application - Suite pipeline and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for the HTTP transport and assertion evaluation)
//! - The ordered step pipeline and the context it threads between steps
//! - The suite runner use case
//! - Application-level error handling

pub mod context;
pub mod error;
pub mod ports;
pub mod session;
pub mod steps;
pub mod suite;

pub use context::SuiteContext;
pub use error::{StepError, SuiteError, SuiteResult};
pub use ports::{HttpClient, HttpClientError, ResponseChecker};
pub use session::{AuthenticatedClient, authenticate};
pub use steps::Step;
pub use suite::StorySuite;
