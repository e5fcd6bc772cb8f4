// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::{collapse_columns, report_fixture};
use camino_tempfile::tempdir;
use indoc::indoc;
use pretty_assertions::assert_eq;
use unittest_report::reporter::{REPORT_FILE_NAME, SummaryReporterBuilder};

#[test]
fn failing_suite_is_expanded() {
    let (outcome, out) = report_fixture("math-run.json", &mut SummaryReporterBuilder::default());

    assert_eq!(
        collapse_columns(outcome.collected.lines()),
        indoc! {"
            File: .../test/math-test.js | FAIL | 600ms
              Suite: FailingSuite | FAIL | 900ms >> expected 150ms
                Test: testFails | FAIL | 900ms >> expected 150ms
                    expected 2 got 3
              Suite: PassingSuite | OK | 300ms


            Tests finished in 0.70s
            ┌─────────┬────────┬─────────┬────────┬───────┐
            │ (index) │ Failed │ Skipped │ Passed │ Total │
            ├─────────┼────────┼─────────┼────────┼───────┤
            │ Files   │ 1      │ 0       │ 0      │ 1     │
            │ Suites  │ 1      │ 0       │ 1      │ 2     │
            │ Tests   │ 1      │ 0       │ 3      │ 4     │
            └─────────┴────────┴─────────┴────────┴───────┘"
        }
    );
    assert!(outcome.mismatches.is_empty());
    assert!(!outcome.is_success());

    // Without console output, the harness's failure message is printed as soon as the file
    // finishes, ahead of the report.
    assert!(out.starts_with("FailingSuite > testFails\n\nexpected 2 got 3\n"));

    for line in outcome.collected.lines() {
        let first = line.split('\t').next().unwrap_or_default();
        assert_eq!(first.chars().count(), 70, "first column is padded: {line:?}");
    }
}

#[test]
fn console_output_is_attributed() {
    let (outcome, out) = report_fixture("console-run.json", &mut SummaryReporterBuilder::default());

    assert_eq!(
        collapse_columns(outcome.collected.lines()),
        indoc! {r#"
            File: .../test/string-test.js | FAIL | 40ms
              Suite: StringTest | FAIL | 30ms
                Test: testConcat | FAIL | 20ms
                    received "a"
                    │ Expecting "ab"
                    Error: concat mismatch
                Test: testUpper | OK | 10ms
            File: .../test/skipped-test.js | SKIPPED | 10ms
              Suite: SkippedTest | SKIPPED | 0ms
                Test: testLater | SKIPPED | 0ms
            File: .../test/ok-test.js | OK | 20ms


            Tests finished in 0.08s
            ┌─────────┬────────┬─────────┬────────┬───────┐
            │ (index) │ Failed │ Skipped │ Passed │ Total │
            ├─────────┼────────┼─────────┼────────┼───────┤
            │ Files   │ 1      │ 1       │ 1      │ 3     │
            │ Suites  │ 1      │ 1       │ 1      │ 3     │
            │ Tests   │ 1      │ 1       │ 2      │ 4     │
            └─────────┴────────┴─────────┴────────┴───────┘"#
        }
    );
    assert!(
        !out.contains("testConcat failed"),
        "failure message is replaced by console output"
    );
    assert!(!out.contains("console."), "attribution lines are dropped");
}

#[test]
fn report_is_written_to_report_dir() {
    let temp = tempdir().expect("created temp dir");
    let report_dir = temp.path().join("coverage");

    let (outcome, _) = report_fixture(
        "math-run.json",
        SummaryReporterBuilder::default()
            .set_colorize(true)
            .set_report_dir(&report_dir),
    );

    let path = outcome.report_path.expect("report dir was set");
    assert_eq!(path, report_dir.join(REPORT_FILE_NAME));
    let contents = std::fs::read_to_string(&path).expect("read report");
    assert_eq!(contents, outcome.collected.contents());
    assert!(!contents.contains('\u{1b}'), "persisted report has no escapes");
}
