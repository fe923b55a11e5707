//! Response testing and assertions.
//!
//! This module provides types for declaring checks on HTTP responses and for
//! reporting the outcome of each suite step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A test assertion to run against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Check response status code.
    StatusCode {
        /// Expected status code.
        expected: u16,
    },
    /// Check the body is present and not blank.
    BodyNotEmpty,
    /// Check a JSON path resolves to a non-empty string.
    ///
    /// Object keys are matched case-insensitively.
    JsonPathNotEmpty {
        /// JSONPath expression (e.g., "$.storyId").
        path: String,
    },
    /// Check a JSON path resolves to a string containing `text`.
    JsonPathContains {
        /// JSONPath expression.
        path: String,
        /// Substring to search for.
        text: String,
    },
    /// Check the body is a non-empty JSON array whose items are objects.
    NonEmptyJsonArray,
}

impl Assertion {
    /// Status code assertion.
    #[must_use]
    pub const fn status(expected: u16) -> Self {
        Self::StatusCode { expected }
    }

    /// Non-empty string at `path`.
    #[must_use]
    pub fn not_empty(path: impl Into<String>) -> Self {
        Self::JsonPathNotEmpty { path: path.into() }
    }

    /// String at `path` containing `text`.
    #[must_use]
    pub fn contains(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self::JsonPathContains {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code = {expected}"),
            Self::BodyNotEmpty => "Body is not empty".to_string(),
            Self::JsonPathNotEmpty { path } => format!("JSON {path} is not empty"),
            Self::JsonPathContains { path, text } => format!("JSON {path} contains '{text}'"),
            Self::NonEmptyJsonArray => "Body is a non-empty JSON array of objects".to_string(),
        }
    }
}

/// Result of running a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssertionResult {
    /// The assertion that was run.
    pub assertion: Assertion,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Actual value found (for display).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// Error message if failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AssertionResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(assertion: Assertion) -> Self {
        Self {
            assertion,
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(assertion: Assertion, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        assertion: Assertion,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            assertion,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}

/// How a suite step ended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// Every assertion held.
    Passed,
    /// An assertion failed, or a precondition did not hold.
    Failed {
        /// First failure message.
        reason: String,
    },
    /// The request never produced a response.
    Errored {
        /// Transport error message.
        error: String,
    },
}

impl StepOutcome {
    /// Returns true for [`StepOutcome::Passed`].
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Short label for report output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::Failed { .. } => "FAIL",
            Self::Errored { .. } => "ERROR",
        }
    }
}

/// Report for one suite step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepReport {
    /// Step name.
    pub name: String,
    /// Outcome of the step.
    #[serde(flatten)]
    pub outcome: StepOutcome,
    /// Individual assertion results; empty when no response was checked.
    #[serde(default)]
    pub assertions: Vec<AssertionResult>,
    /// Step duration in milliseconds.
    pub duration_ms: u64,
}

impl StepReport {
    /// Builds a report from assertion results.
    ///
    /// The step passes when every assertion passed.
    #[must_use]
    pub fn checked(name: impl Into<String>, assertions: Vec<AssertionResult>, duration_ms: u64) -> Self {
        let outcome = assertions
            .iter()
            .find(|r| !r.passed)
            .map_or(StepOutcome::Passed, |failed| StepOutcome::Failed {
                reason: failed
                    .error
                    .clone()
                    .unwrap_or_else(|| failed.assertion.description()),
            });

        Self {
            name: name.into(),
            outcome,
            assertions,
            duration_ms,
        }
    }

    /// A step that failed before any request was sent.
    #[must_use]
    pub fn failed(name: impl Into<String>, reason: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            name: name.into(),
            outcome: StepOutcome::Failed {
                reason: reason.into(),
            },
            assertions: Vec::new(),
            duration_ms,
        }
    }

    /// A step whose request failed in transport.
    #[must_use]
    pub fn errored(name: impl Into<String>, error: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            name: name.into(),
            outcome: StepOutcome::Errored {
                error: error.into(),
            },
            assertions: Vec::new(),
            duration_ms,
        }
    }
}

/// Results from running the suite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuiteReport {
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Per-step reports, in execution order.
    pub steps: Vec<StepReport>,
    /// Total number of steps.
    pub total: usize,
    /// Number of passed steps.
    pub passed: usize,
    /// Number of failed or errored steps.
    pub failed: usize,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl SuiteReport {
    /// Create new suite results.
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, steps: Vec<StepReport>, duration_ms: u64) -> Self {
        let total = steps.len();
        let passed = steps.iter().filter(|s| s.outcome.is_passed()).count();

        Self {
            started_at,
            steps,
            total,
            passed,
            failed: total - passed,
            duration_ms,
        }
    }

    /// Check if all steps passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Looks up a step report by name.
    #[must_use]
    pub fn step(&self, name: &str) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// Get pass rate as percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}
