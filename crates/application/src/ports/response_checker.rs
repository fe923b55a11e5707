//! Response checker port

use spoiler_domain::{Assertion, AssertionResult, ResponseSpec};

/// Port for evaluating assertions against a received response.
pub trait ResponseChecker: Send + Sync {
    /// Runs every assertion and returns one result per assertion, in order.
    fn check(&self, assertions: &[Assertion], response: &ResponseSpec) -> Vec<AssertionResult>;
}
