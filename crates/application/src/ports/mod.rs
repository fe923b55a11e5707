//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the suite pipeline and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod http_client;
mod response_checker;

pub use http_client::{HttpClient, HttpClientError};
pub use response_checker::ResponseChecker;
