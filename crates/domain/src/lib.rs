//! Story Spoiler Domain - Core types
//!
//! This crate defines the domain model for the Story Spoiler API acceptance
//! suite: credentials, story payloads, the response envelope, transport-neutral
//! request/response specs and the assertion model.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod request;
pub mod response;
pub mod routes;
pub mod story;
pub mod testing;

pub use auth::{Credentials, LoginResponse, SessionToken};
pub use error::{DomainError, DomainResult};
pub use request::{HttpMethod, RequestAuth, RequestSpec};
pub use response::ResponseSpec;
pub use routes::ApiRoutes;
pub use story::{ApiResponse, StoryDraft, lookup_field};
pub use testing::{Assertion, AssertionResult, StepOutcome, StepReport, SuiteReport};
