//! Login and the bearer-authenticated client used after it.

use std::future::Future;
use std::sync::Arc;

use spoiler_domain::{
    ApiRoutes, Credentials, HttpMethod, LoginResponse, RequestAuth, RequestSpec, ResponseSpec,
    SessionToken,
};
use tracing::{debug, info};

use crate::error::{SuiteError, SuiteResult};
use crate::ports::{HttpClient, HttpClientError};

/// Exchanges credentials for a session token.
///
/// The status code is not checked; only the `accessToken` field matters.
///
/// # Errors
///
/// Returns [`SuiteError::Transport`] if the login request gets no response,
/// and [`SuiteError::Authentication`] if the body is not JSON or carries no
/// non-empty `accessToken`.
pub async fn authenticate<C: HttpClient>(
    client: &C,
    routes: &ApiRoutes,
    credentials: &Credentials,
) -> SuiteResult<SessionToken> {
    let request = RequestSpec::new("authenticate", HttpMethod::Post, routes.authentication())
        .with_json(credentials)?;

    info!(user = %credentials.username, url = %request.url, "authenticating");
    let response = client.execute(&request).await?;
    debug!(status = response.status, "login response received");

    let login: LoginResponse = serde_json::from_str(&response.body).map_err(|e| {
        SuiteError::Authentication(format!(
            "{}: response is not JSON ({e})",
            response.status_line()
        ))
    })?;

    let token = login
        .access_token
        .ok_or_else(|| {
            SuiteError::Authentication(format!("{}: no accessToken in response", response.status_line()))
        })
        .and_then(|raw| {
            SessionToken::new(raw).map_err(|_| {
                SuiteError::Authentication(format!("{}: accessToken is empty", response.status_line()))
            })
        })?;

    info!("authenticated");
    Ok(token)
}

/// Client wrapper that attaches the session's bearer token to every request.
///
/// Built once after login and shared read-only by every step of the run.
pub struct AuthenticatedClient<C> {
    inner: Arc<C>,
    token: SessionToken,
}

impl<C: HttpClient> AuthenticatedClient<C> {
    /// Wraps `inner` with `token`.
    pub const fn new(inner: Arc<C>, token: SessionToken) -> Self {
        Self { inner, token }
    }
}

impl<C: HttpClient> HttpClient for AuthenticatedClient<C> {
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<ResponseSpec, HttpClientError>> + Send {
        let request = request
            .clone()
            .with_auth(RequestAuth::Bearer(self.token.clone()));
        async move { self.inner.execute(&request).await }
    }
}
