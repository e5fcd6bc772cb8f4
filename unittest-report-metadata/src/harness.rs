// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::ResultsReadError;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// The results of a complete harness run.
///
/// This is the top-level object of the results document.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// The time the run started, in milliseconds since the Unix epoch.
    pub start_time: f64,

    /// The total number of tests in the run, as counted by the harness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_total_tests: Option<usize>,

    /// Run-level counters. Harnesses usually report these at suite (file) granularity.
    #[serde(flatten)]
    pub counters: HarnessCounters,

    /// One entry per executed test file, in execution order.
    #[serde(default)]
    pub test_results: Vec<FileRunSummary>,
}

impl RunSummary {
    /// Parses a results document from a JSON string.
    pub fn parse_json(json: &str) -> Result<Self, ResultsReadError> {
        serde_json::from_str(json).map_err(ResultsReadError::Json)
    }

    /// Reads and parses a results document from the given reader.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, ResultsReadError> {
        let mut json = String::new();
        reader
            .read_to_string(&mut json)
            .map_err(ResultsReadError::Io)?;
        Self::parse_json(&json)
    }

    /// Returns the wall-clock time covered by the run, in milliseconds.
    ///
    /// This is the end of the latest file window minus the run start time, or zero if no files
    /// were executed.
    pub fn elapsed_ms(&self) -> f64 {
        self.test_results
            .iter()
            .map(|file| file.perf_stats.end)
            .fold(None, |latest: Option<f64>, end| {
                Some(latest.map_or(end, |latest| latest.max(end)))
            })
            .map_or(0.0, |end| (end - self.start_time).max(0.0))
    }
}

/// The results of executing a single test file.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileRunSummary {
    /// The path to the test file.
    pub test_file_path: Utf8PathBuf,

    /// The tests in this file, in execution order.
    #[serde(default)]
    pub test_results: Vec<TestCaseSummary>,

    /// The time window in which the file executed.
    pub perf_stats: PerfStats,

    /// File-level counters. Harnesses usually report these at test granularity.
    #[serde(flatten)]
    pub counters: HarnessCounters,

    /// The aggregated failure message for the whole file, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,

    /// Console output captured while the file executed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console: Option<Vec<ConsoleEntry>>,
}

impl FileRunSummary {
    /// Returns the number of failing tests reported for this file.
    ///
    /// Falls back to counting test results if the harness didn't report counters.
    pub fn num_failing(&self) -> usize {
        match self.counters.counts() {
            Some(counts) => counts.failing,
            None => self
                .test_results
                .iter()
                .filter(|result| result.status == TestStatus::Failed)
                .count(),
        }
    }
}

/// The window of time in which a test file executed.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct PerfStats {
    /// Start time in milliseconds since the Unix epoch.
    pub start: f64,

    /// End time in milliseconds since the Unix epoch.
    pub end: f64,
}

impl PerfStats {
    /// Creates a new window.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Returns the length of the window in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.end - self.start
    }
}

/// The result of a single test.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseSummary {
    /// The titles of the enclosing groups, outermost first. The first one names the suite.
    #[serde(default)]
    pub ancestor_titles: Vec<String>,

    /// The title of the test.
    pub title: String,

    /// The outcome of the test.
    pub status: TestStatus,

    /// How long the test took, in milliseconds. Tests that didn't run have no duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    /// Failure messages, one block per failed assertion or error.
    #[serde(default)]
    pub failure_messages: Vec<String>,
}

impl TestCaseSummary {
    /// Creates a new test result with no ancestors, duration or failure messages.
    pub fn new(title: impl Into<String>, status: TestStatus) -> Self {
        Self {
            ancestor_titles: Vec::new(),
            title: title.into(),
            status,
            duration: None,
            failure_messages: Vec::new(),
        }
    }

    /// Returns the name of the suite this test belongs to.
    ///
    /// This is the first ancestor title, or the empty string for tests declared outside any
    /// group.
    pub fn suite_name(&self) -> &str {
        self.ancestor_titles.first().map_or("", String::as_str)
    }

    /// Returns the duration in milliseconds, treating a missing duration as zero.
    pub fn duration_ms(&self) -> f64 {
        self.duration.unwrap_or(0.0)
    }
}

/// The outcome of a single test, as decided by the harness.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// The test passed.
    Passed,

    /// The test failed.
    Failed,

    /// The test did not run.
    #[serde(alias = "skipped", alias = "todo", alias = "disabled")]
    Pending,
}

/// A single entry of console output captured by the harness.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ConsoleEntry {
    /// The logged message. May span several lines.
    pub message: String,

    /// Where the message was logged from, as a stack trace.
    #[serde(default)]
    pub origin: String,

    /// The console method used, e.g. `log` or `error`.
    #[serde(rename = "type", default = "default_console_type")]
    pub entry_type: String,
}

impl ConsoleEntry {
    /// Creates a new `console.log` entry with no origin.
    pub fn log(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            origin: String::new(),
            entry_type: default_console_type(),
        }
    }
}

fn default_console_type() -> String {
    "log".to_owned()
}

/// Pass/pending/fail counters as reported by the harness.
///
/// Harnesses use two naming schemes for these counters: a suite-granularity set on aggregated
/// results, and a test-granularity set on per-file results. Usually one of them is populated;
/// [`counts`](Self::counts) picks the right one.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HarnessCounters {
    /// Suites that passed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_passed_test_suites: Option<usize>,

    /// Suites that were skipped entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_pending_test_suites: Option<usize>,

    /// Suites with at least one failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_failed_test_suites: Option<usize>,

    /// Tests that passed.
    #[serde(
        default,
        alias = "numPassedTests",
        skip_serializing_if = "Option::is_none"
    )]
    pub num_passing_tests: Option<usize>,

    /// Tests that were skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_pending_tests: Option<usize>,

    /// Tests that failed.
    #[serde(
        default,
        alias = "numFailedTests",
        skip_serializing_if = "Option::is_none"
    )]
    pub num_failing_tests: Option<usize>,
}

impl HarnessCounters {
    /// Creates counters populated at test granularity.
    pub fn tests(passing: usize, pending: usize, failing: usize) -> Self {
        Self {
            num_passing_tests: Some(passing),
            num_pending_tests: Some(pending),
            num_failing_tests: Some(failing),
            ..Default::default()
        }
    }

    /// Creates counters populated at suite granularity.
    pub fn suites(passing: usize, pending: usize, failing: usize) -> Self {
        Self {
            num_passed_test_suites: Some(passing),
            num_pending_test_suites: Some(pending),
            num_failed_test_suites: Some(failing),
            ..Default::default()
        }
    }

    /// Returns the populated counter set, or `None` if the harness reported neither.
    ///
    /// If the suite-granularity set is present, it takes precedence and the test-granularity set
    /// is ignored, so the two are never summed together.
    pub fn counts(&self) -> Option<HarnessCounts> {
        if self.num_passed_test_suites.is_some() {
            Some(HarnessCounts {
                granularity: CounterGranularity::Suites,
                passing: self.num_passed_test_suites.unwrap_or(0),
                pending: self.num_pending_test_suites.unwrap_or(0),
                failing: self.num_failed_test_suites.unwrap_or(0),
            })
        } else if self.num_passing_tests.is_some()
            || self.num_pending_tests.is_some()
            || self.num_failing_tests.is_some()
        {
            Some(HarnessCounts {
                granularity: CounterGranularity::Tests,
                passing: self.num_passing_tests.unwrap_or(0),
                pending: self.num_pending_tests.unwrap_or(0),
                failing: self.num_failing_tests.unwrap_or(0),
            })
        } else {
            None
        }
    }
}

/// Which of the two harness counter sets a [`HarnessCounts`] was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterGranularity {
    /// The suite-granularity set (`numPassedTestSuites` etc).
    Suites,

    /// The test-granularity set (`numPassingTests` etc).
    Tests,
}

/// A resolved set of harness counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HarnessCounts {
    /// The set these counts were read from.
    pub granularity: CounterGranularity,

    /// The number of passing units.
    pub passing: usize,

    /// The number of pending units.
    pub pending: usize,

    /// The number of failing units.
    pub failing: usize,
}

impl HarnessCounts {
    /// Returns the sum of all counts.
    pub fn total(&self) -> usize {
        self.passing + self.pending + self.failing
    }
}
