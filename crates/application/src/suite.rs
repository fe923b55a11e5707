//! Suite runner use case.
//!
//! Authenticates once, then runs the selected steps strictly in order against
//! one shared authenticated client. A failing step never stops the run.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use spoiler_domain::{ApiRoutes, Credentials, StepReport, SuiteReport};
use tracing::{info, warn};

use crate::context::SuiteContext;
use crate::error::SuiteResult;
use crate::ports::{HttpClient, ResponseChecker};
use crate::session::{AuthenticatedClient, authenticate};
use crate::steps::Step;

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Runs the Story API suite.
///
/// # Example
///
/// ```ignore
/// let client = Arc::new(ReqwestHttpClient::new()?);
/// let suite = StorySuite::new(client, TestRunner::new(), routes, credentials);
///
/// let report = suite.run(&Step::ALL).await?;
/// assert!(report.all_passed());
/// ```
pub struct StorySuite<C, K> {
    client: Arc<C>,
    checker: K,
    routes: ApiRoutes,
    credentials: Credentials,
}

impl<C: HttpClient, K: ResponseChecker> StorySuite<C, K> {
    /// Creates a suite runner over `client`.
    pub const fn new(client: Arc<C>, checker: K, routes: ApiRoutes, credentials: Credentials) -> Self {
        Self {
            client,
            checker,
            routes,
            credentials,
        }
    }

    /// Authenticates, then runs `selection` in canonical order.
    ///
    /// # Errors
    ///
    /// Returns an error only if authentication fails; step failures are
    /// reported in the returned [`SuiteReport`].
    pub async fn run(&self, selection: &[Step]) -> SuiteResult<SuiteReport> {
        let started_at = Utc::now();
        let start = Instant::now();

        let token = authenticate(self.client.as_ref(), &self.routes, &self.credentials).await?;
        let session = AuthenticatedClient::new(Arc::clone(&self.client), token);

        let mut context = SuiteContext::new();
        let mut reports = Vec::with_capacity(selection.len());
        for step in Step::ordered(selection) {
            reports.push(self.run_step(&session, step, &mut context).await);
        }

        let report = SuiteReport::new(started_at, reports, elapsed_ms(start));
        info!(
            total = report.total,
            passed = report.passed,
            failed = report.failed,
            "suite finished"
        );
        Ok(report)
    }

    /// Runs one step against an already authenticated client.
    pub async fn run_step<S: HttpClient>(
        &self,
        session: &S,
        step: Step,
        context: &mut SuiteContext,
    ) -> StepReport {
        let start = Instant::now();

        let request = match step.request(&self.routes, context) {
            Ok(request) => request,
            Err(e) => {
                warn!(step = %step, error = %e, "precondition failed");
                return StepReport::failed(step.name(), e.to_string(), elapsed_ms(start));
            }
        };

        info!(step = %step, method = %request.method, url = %request.url, request_id = %request.id, "sending");
        let response = match session.execute(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(step = %step, error = %e, "request failed");
                return StepReport::errored(step.name(), e.to_string(), elapsed_ms(start));
            }
        };
        info!(
            step = %step,
            status = response.status,
            elapsed_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX),
            "received"
        );

        let results = self.checker.check(&step.assertions(), &response);
        let report = StepReport::checked(step.name(), results, elapsed_ms(start));

        if report.outcome.is_passed() {
            step.record(&response, context);
        } else {
            warn!(step = %step, outcome = ?report.outcome, "step failed");
        }
        report
    }
}
