//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It handles all HTTP communication for the suite.

use std::error::Error as _;
use std::future::Future;
use std::time::Instant;

use reqwest::{Client, Method, RequestBuilder, Url};
use spoiler_application::ports::{HttpClient, HttpClientError};
use spoiler_domain::{HttpMethod, RequestAuth, RequestSpec, ResponseSpec};
use tracing::debug;

/// Redirects followed before giving up.
const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// Wraps one `reqwest::Client`, so connections are pooled across every step
/// of a run.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - No request timeout
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("spoiler-check/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Builds the reqwest request from a domain `RequestSpec`.
    fn build(&self, request: &RequestSpec, url: Url) -> RequestBuilder {
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);

        if let RequestAuth::Bearer(token) = &request.auth {
            builder = builder.bearer_auth(token.expose());
        }

        // `json` also sets `Content-Type: application/json`
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        builder
    }

    /// Flattens an error and its sources into one message.
    fn describe(error: &reqwest::Error) -> String {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    /// Maps reqwest errors to the port's `HttpClientError`.
    fn map_error(error: &reqwest::Error) -> HttpClientError {
        let message = Self::describe(error);
        let lowered = message.to_lowercase();
        let host = error
            .url()
            .and_then(Url::host_str)
            .unwrap_or("unknown")
            .to_string();

        if error.is_connect() {
            if lowered.contains("dns") || lowered.contains("resolve") {
                return HttpClientError::DnsError { host, message };
            }
            if lowered.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host,
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(message)
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<ResponseSpec, HttpClientError>> + Send {
        let request = request.clone();

        async move {
            let url = Url::parse(&request.url)
                .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;

            debug!(request_id = %request.id, method = %request.method, %url, "executing request");
            let start = Instant::now();

            let response = self
                .build(&request, url)
                .send()
                .await
                .map_err(|e| Self::map_error(&e))?;

            let status = response.status().as_u16();

            let body = response
                .bytes()
                .await
                .map_err(|e| HttpClientError::BodyRead(Self::describe(&e)))?
                .to_vec();

            let duration = start.elapsed();
            debug!(request_id = %request.id, status, bytes = body.len(), "response read");

            Ok(ResponseSpec::new(status, body, duration))
        }
    }
}
