//! Plain-text rendering of suite reports.

use std::fmt::Write as _;

use spoiler_application::Step;
use spoiler_domain::{StepOutcome, SuiteReport};

/// Renders `report` for a terminal.
pub fn render(report: &SuiteReport, base_url: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Story Spoiler API suite against {base_url}");
    let _ = writeln!(out);

    for step in &report.steps {
        let _ = writeln!(
            out,
            "  {:<5} {} ({} ms)",
            step.outcome.label(),
            step.name,
            step.duration_ms
        );
        match &step.outcome {
            StepOutcome::Passed => {}
            StepOutcome::Failed { reason } => {
                let _ = writeln!(out, "        {reason}");
            }
            StepOutcome::Errored { error } => {
                let _ = writeln!(out, "        transport error: {error}");
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} steps: {} passed, {} failed ({:.1}%) in {} ms",
        report.total,
        report.passed,
        report.failed,
        report.pass_rate(),
        report.duration_ms
    );
    out
}

/// Renders the step catalogue printed by `--list`.
pub fn render_steps() -> String {
    Step::ALL.iter().fold(String::new(), |mut out, step| {
        let _ = writeln!(out, "{:<22} {}", step.name(), step.summary());
        out
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use spoiler_domain::{Assertion, AssertionResult, StepReport};

    fn sample() -> SuiteReport {
        SuiteReport::new(
            Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap(),
            vec![
                StepReport::checked(
                    "create_story",
                    vec![AssertionResult::pass(Assertion::status(201))],
                    42,
                ),
                StepReport::failed("edit_story", "Previous test must create a story.", 0),
                StepReport::errored("list_stories", "Connection refused to stories.test:443", 3),
            ],
            45,
        )
    }

    #[test]
    fn test_render_text_report() {
        let text = render(&sample(), "https://stories.test/");

        assert_eq!(
            text,
            "Story Spoiler API suite against https://stories.test/\n\
             \n  PASS  create_story (42 ms)\
             \n  FAIL  edit_story (0 ms)\
             \n        Previous test must create a story.\
             \n  ERROR list_stories (3 ms)\
             \n        transport error: Connection refused to stories.test:443\
             \n\
             \n3 steps: 1 passed, 2 failed (33.3%) in 45 ms\n"
        );
    }

    #[test]
    fn test_render_steps_lists_every_step() {
        let text = render_steps();
        let names: Vec<&str> = text
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .collect();

        assert_eq!(names, Step::ALL.map(Step::name).to_vec());
        assert!(text.contains("delete of an unknown id returns 400"));
    }

    #[test]
    fn test_json_report_shape() {
        let value = serde_json::to_value(sample()).unwrap();

        assert_eq!(value["total"], 3);
        assert_eq!(value["steps"][0]["status"], "passed");
        assert_eq!(value["steps"][1]["reason"], "Previous test must create a story.");
        assert_eq!(value["steps"][2]["status"], "errored");
    }
}
