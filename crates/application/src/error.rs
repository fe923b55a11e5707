//! Application error types

use spoiler_domain::DomainError;
use thiserror::Error;

use crate::ports::HttpClientError;

/// Errors that abort a suite run before any step executes.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Login did not yield a usable access token.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The login request produced no response.
    #[error("transport error: {0}")]
    Transport(#[from] HttpClientError),

    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Reasons a step fails before its request is sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StepError {
    /// The edit step ran without a story created earlier in the run.
    #[error("Previous test must create a story.")]
    NoStoryToEdit,

    /// The delete step ran without a story created earlier in the run.
    #[error("Previous tests must create a story.")]
    NoStoryToDelete,

    /// The request could not be built.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result type alias for suite operations.
pub type SuiteResult<T> = Result<T, SuiteError>;
