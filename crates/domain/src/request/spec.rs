//! Request specification type

use serde::Serialize;
use uuid::Uuid;

use super::HttpMethod;
use crate::auth::SessionToken;
use crate::error::{DomainError, DomainResult};

/// Credential attached to an outgoing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestAuth {
    /// Anonymous request.
    #[default]
    None,
    /// `Authorization: Bearer <token>`.
    Bearer(SessionToken),
}

/// Complete specification for an HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// Unique identifier for this request, used to correlate log lines
    pub id: Uuid,
    /// Human-readable name
    pub name: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: String,
    /// JSON request body
    pub body: Option<serde_json::Value>,
    /// Authentication to apply
    pub auth: RequestAuth,
}

impl RequestSpec {
    /// Creates a new request specification without body or auth.
    #[must_use]
    pub fn new(name: impl Into<String>, method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            method,
            url: url.into(),
            body: None,
            auth: RequestAuth::None,
        }
    }

    /// Creates a GET request with the given URL.
    #[must_use]
    pub fn get(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Get, url)
    }

    /// Creates a DELETE request with the given URL.
    #[must_use]
    pub fn delete(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Delete, url)
    }

    /// Sets a JSON body (builder pattern).
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBody`] if the payload cannot be encoded.
    pub fn with_json<T: Serialize>(mut self, payload: &T) -> DomainResult<Self> {
        let value =
            serde_json::to_value(payload).map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Sets the authentication (builder pattern).
    #[must_use]
    pub fn with_auth(mut self, auth: RequestAuth) -> Self {
        self.auth = auth;
        self
    }
}
