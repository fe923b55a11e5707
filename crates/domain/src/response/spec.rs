//! Response specification type
//!
//! Contains types for representing HTTP responses including
//! status codes, body, and timing information.

use std::time::Duration;

/// Returns the canonical reason phrase for the status codes the Story API uses.
#[must_use]
pub const fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        415 => "Unsupported Media Type",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// HTTP response specification.
///
/// Contains the parts of an HTTP exchange the suite asserts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSpec {
    /// HTTP status code.
    pub status: u16,
    /// Response body as string.
    pub body: String,
    /// Response time.
    pub duration: Duration,
}

impl ResponseSpec {
    /// Creates a new `ResponseSpec` from raw response data.
    ///
    /// Invalid UTF-8 in the body is replaced rather than rejected.
    #[must_use]
    pub fn new(status: u16, body: Vec<u8>, duration: Duration) -> Self {
        let body = String::from_utf8(body)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());

        Self {
            status,
            body,
            duration,
        }
    }

    /// Shorthand for an immediate response, used by test doubles.
    #[must_use]
    pub fn json(status: u16, body: &str) -> Self {
        Self::new(status, body.as_bytes().to_vec(), Duration::ZERO)
    }

    /// Status line in `201 Created` form.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!("{} {}", self.status, reason_phrase(self.status))
    }

    /// Returns the first `max` characters of the body, for failure messages.
    #[must_use]
    pub fn body_preview(&self, max: usize) -> String {
        if self.body.chars().count() > max {
            let head: String = self.body.chars().take(max).collect();
            format!("{head}...")
        } else {
            self.body.clone()
        }
    }
}
