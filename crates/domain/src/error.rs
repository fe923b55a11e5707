//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The configured base URL cannot host API routes.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The request body could not be encoded as JSON.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// A session token is empty.
    #[error("session token must not be empty")]
    EmptyToken,
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
