// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for reporter test fixtures.

use super::FileRun;
use unittest_report_metadata::{
    FileRunSummary, HarnessCounters, PerfStats, TestCaseSummary, TestStatus,
};

/// Returns a file run with no console output and no failure message.
pub(crate) fn file_run(
    path: &str,
    perf_stats: PerfStats,
    counters: Option<HarnessCounters>,
    test_results: Vec<TestCaseSummary>,
) -> FileRun {
    FileRun {
        summary: FileRunSummary {
            test_file_path: path.into(),
            test_results,
            perf_stats,
            counters: counters.unwrap_or_default(),
            failure_message: None,
            console: None,
        },
        log_lines: None,
    }
}

/// Returns a test result with a single ancestor title.
pub(crate) fn test_result(
    suite: &str,
    title: &str,
    status: TestStatus,
    duration: f64,
) -> TestCaseSummary {
    TestCaseSummary {
        ancestor_titles: vec![suite.to_owned()],
        duration: Some(duration),
        ..TestCaseSummary::new(title, status)
    }
}
