//! Test runner implementation.
//!
//! Executes assertions against HTTP responses and produces assertion results.

use serde_json::Value;
use spoiler_application::ports::ResponseChecker;
use spoiler_domain::{ApiResponse, Assertion, AssertionResult, ResponseSpec, lookup_field};

/// Characters of body shown in failure messages.
const PREVIEW_LEN: usize = 100;

/// Test runner that executes assertions against responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestRunner;

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run a single assertion against a response.
    #[must_use]
    pub fn run_assertion(&self, assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match assertion {
            Assertion::StatusCode { expected } => {
                Self::check_status_code(assertion, response, *expected)
            }
            Assertion::BodyNotEmpty => Self::check_body_not_empty(assertion, response),
            Assertion::JsonPathNotEmpty { path } => {
                Self::check_json_path_not_empty(assertion, response, path)
            }
            Assertion::JsonPathContains { path, text } => {
                Self::check_json_path_contains(assertion, response, path, text)
            }
            Assertion::NonEmptyJsonArray => Self::check_non_empty_json_array(assertion, response),
        }
    }

    fn check_status_code(
        assertion: &Assertion,
        response: &ResponseSpec,
        expected: u16,
    ) -> AssertionResult {
        let actual = response.status;
        if actual == expected {
            AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                response.status_line(),
                format!(
                    "Expected status {expected}, got {} (body: {})",
                    response.status_line(),
                    response.body_preview(PREVIEW_LEN)
                ),
            )
        }
    }

    fn check_body_not_empty(assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        if response.body.is_empty() {
            AssertionResult::fail(assertion.clone(), "Response body is empty")
        } else {
            AssertionResult::pass(assertion.clone())
        }
    }

    fn check_json_path_not_empty(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
    ) -> AssertionResult {
        let json = match parse_body(response) {
            Ok(json) => json,
            Err(e) => return AssertionResult::fail(assertion.clone(), e),
        };

        match query_json_path(&json, path) {
            Ok(Some(Value::String(s))) if !s.is_empty() => {
                AssertionResult::pass_with_value(assertion.clone(), s.clone())
            }
            Ok(Some(value @ Value::Number(_))) => {
                AssertionResult::pass_with_value(assertion.clone(), value.to_string())
            }
            Ok(Some(value)) => AssertionResult::fail_with_value(
                assertion.clone(),
                value.to_string(),
                format!("JSON path '{path}' is empty"),
            ),
            Ok(None) => {
                AssertionResult::fail(assertion.clone(), format!("JSON path '{path}' not found"))
            }
            Err(e) => AssertionResult::fail(
                assertion.clone(),
                format!("Invalid JSON path '{path}': {e}"),
            ),
        }
    }

    fn check_json_path_contains(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
        text: &str,
    ) -> AssertionResult {
        let json = match parse_body(response) {
            Ok(json) => json,
            Err(e) => return AssertionResult::fail(assertion.clone(), e),
        };

        match query_json_path(&json, path) {
            Ok(Some(Value::String(s))) => {
                if s.contains(text) {
                    AssertionResult::pass_with_value(assertion.clone(), s.clone())
                } else {
                    AssertionResult::fail_with_value(
                        assertion.clone(),
                        s.clone(),
                        format!("JSON path '{path}' value '{s}' does not contain '{text}'"),
                    )
                }
            }
            Ok(Some(value)) => AssertionResult::fail_with_value(
                assertion.clone(),
                value.to_string(),
                format!("JSON path '{path}' is not a string"),
            ),
            Ok(None) => {
                AssertionResult::fail(assertion.clone(), format!("JSON path '{path}' not found"))
            }
            Err(e) => AssertionResult::fail(
                assertion.clone(),
                format!("Invalid JSON path '{path}': {e}"),
            ),
        }
    }

    fn check_non_empty_json_array(
        assertion: &Assertion,
        response: &ResponseSpec,
    ) -> AssertionResult {
        let json = match parse_body(response) {
            Ok(json) => json,
            Err(e) => return AssertionResult::fail(assertion.clone(), e),
        };

        let Value::Array(items) = json else {
            return AssertionResult::fail_with_value(
                assertion.clone(),
                response.body_preview(PREVIEW_LEN),
                "Body is not a JSON array",
            );
        };

        if items.is_empty() {
            return AssertionResult::fail_with_value(
                assertion.clone(),
                "[]",
                "Expected non-empty stories array",
            );
        }

        match items.iter().position(|item| !item.is_object()) {
            Some(index) => AssertionResult::fail_with_value(
                assertion.clone(),
                items[index].to_string(),
                format!("Array item {index} is not a JSON object"),
            ),
            None => AssertionResult::pass_with_value(
                assertion.clone(),
                format!("{} items", items.len()),
            ),
        }
    }
}

impl ResponseChecker for TestRunner {
    fn check(&self, assertions: &[Assertion], response: &ResponseSpec) -> Vec<AssertionResult> {
        assertions
            .iter()
            .map(|assertion| self.run_assertion(assertion, response))
            .collect()
    }
}

fn parse_body(response: &ResponseSpec) -> Result<Value, String> {
    serde_json::from_str::<Value>(&response.body)
        .map_err(|e| format!("Failed to parse body as JSON: {e}"))
}

/// Query a JSON value using a simple JSONPath-like syntax.
/// Supports: $.field, $.field.nested, $.array[0]
///
/// Object keys match case-insensitively when there is no exact match.
fn query_json_path<'a>(json: &'a Value, path: &str) -> Result<Option<&'a Value>, String> {
    let path = path.trim();
    let Some(path) = path.strip_prefix('$') else {
        return Err("JSON path must start with '$'".to_string());
    };

    let path = path.strip_prefix('.').unwrap_or(path);
    let mut current = json;

    for segment in split_path_segments(path) {
        let (name, index) = match parse_array_access(&segment) {
            Some((name, index)) => (name, Some(index)),
            None => (segment.as_str(), None),
        };

        if !name.is_empty() {
            current = match get_field(current, name) {
                Some(v) => v,
                None => return Ok(None),
            };
        }

        if let Some(index) = index {
            let idx: usize = index
                .parse()
                .map_err(|_| format!("Invalid array index: {index}"))?;
            current = match current.get(idx) {
                Some(v) => v,
                None => return Ok(None),
            };
        }
    }

    Ok(Some(current))
}

fn get_field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    lookup_field(value.as_object()?, key)
}

/// Split a path into segments, respecting array brackets.
fn split_path_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for ch in path.chars() {
        match ch {
            '.' if !in_bracket => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                in_bracket = true;
                current.push(ch);
            }
            ']' => {
                in_bracket = false;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Parse array access like "field[0]" into ("field", "0").
fn parse_array_access(segment: &str) -> Option<(&str, &str)> {
    let bracket_start = segment.find('[')?;
    let inner = segment.strip_suffix(']')?;
    Some((&segment[..bracket_start], &inner[bracket_start + 1..]))
}
