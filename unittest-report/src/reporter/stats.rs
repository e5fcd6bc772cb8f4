// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pass/fail/timing statistics at test, suite, file and run granularity.
//!
//! The building block is [`StatCounter`], a plain value with three pure operations: `+` merges
//! counters that are already measured in the same units, [`StatCounter::aggregate`] rolls a single
//! child outcome one level up, and [`StatCounter::status`] classifies a counter for display.

use super::FileRun;
use crate::errors::StatsMismatch;
use camino::Utf8PathBuf;
use std::{collections::BTreeMap, fmt, iter::Sum, ops};
use unittest_report_metadata::{HarnessCounters, TestCaseSummary, TestStatus};

/// Counts of passing, pending and failing units, plus accumulated time in milliseconds.
///
/// Once fully aggregated, `total == passing + pending + failing`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatCounter {
    /// Units that passed.
    pub passing: usize,
    /// Units that were skipped.
    pub pending: usize,
    /// Units that failed.
    pub failing: usize,
    /// All units.
    pub total: usize,
    /// Accumulated time in milliseconds.
    pub time: f64,
}

impl StatCounter {
    /// Returns a one-unit counter for a single test outcome.
    pub fn from_status(status: TestStatus) -> Self {
        Self::default().aggregate(status)
    }

    /// Returns a one-unit counter for a single test result, including its duration.
    pub fn from_result(result: &TestCaseSummary) -> Self {
        Self {
            time: result.duration_ms(),
            ..Self::from_status(result.status)
        }
    }

    /// Returns a counter read from harness counters, or `None` if the harness reported neither
    /// counter set.
    pub fn from_harness(counters: &HarnessCounters) -> Option<Self> {
        counters.counts().map(|counts| Self {
            passing: counts.passing,
            pending: counts.pending,
            failing: counts.failing,
            total: counts.total(),
            time: 0.0,
        })
    }

    /// Rolls a single child outcome into this counter.
    ///
    /// `total` goes up by one, and exactly one of `passing`, `pending` or `failing` goes up by
    /// one.
    #[must_use]
    pub fn aggregate(mut self, outcome: TestStatus) -> Self {
        self.total += 1;
        match outcome {
            TestStatus::Passed => self.passing += 1,
            TestStatus::Pending => self.pending += 1,
            TestStatus::Failed => self.failing += 1,
        }
        self
    }

    /// Returns the outcome this counter contributes when rolled one level up.
    ///
    /// Any failure makes the whole unit fail; otherwise any pass makes it pass; otherwise any
    /// pending unit makes it pending. An empty counter has no outcome.
    pub fn outcome(&self) -> Option<TestStatus> {
        if self.failing > 0 {
            Some(TestStatus::Failed)
        } else if self.passing > 0 {
            Some(TestStatus::Passed)
        } else if self.pending > 0 {
            Some(TestStatus::Pending)
        } else {
            None
        }
    }

    /// Classifies this counter for display.
    pub fn status(&self) -> RollupStatus {
        match self.outcome() {
            Some(TestStatus::Failed) => RollupStatus::Fail,
            Some(TestStatus::Passed) => RollupStatus::Ok,
            Some(TestStatus::Pending) => RollupStatus::Skipped,
            None => RollupStatus::NoTest,
        }
    }

    /// Returns true if this unit should be broken down further in the report: it has at least
    /// one pending or failing unit.
    pub fn needs_detail(&self) -> bool {
        self.pending > 0 || self.failing > 0
    }

    /// Compares counts, ignoring time.
    pub fn same_counts(&self, other: &Self) -> bool {
        (self.passing, self.pending, self.failing, self.total)
            == (other.passing, other.pending, other.failing, other.total)
    }
}

impl ops::Add for StatCounter {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            passing: self.passing + other.passing,
            pending: self.pending + other.pending,
            failing: self.failing + other.failing,
            total: self.total + other.total,
            time: self.time + other.time,
        }
    }
}

impl ops::AddAssign for StatCounter {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for StatCounter {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, counter| acc + counter)
    }
}

/// The display status of a [`StatCounter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RollupStatus {
    /// At least one unit failed.
    Fail,
    /// No failures, at least one pass.
    Ok,
    /// Only pending units.
    Skipped,
    /// No units at all.
    NoTest,
}

impl RollupStatus {
    /// Returns the text shown in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fail => "FAIL",
            Self::Ok => "OK",
            Self::Skipped => "SKIPPED",
            Self::NoTest => "NO TEST",
        }
    }
}

impl fmt::Display for RollupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unit a [`StatsMismatch`] refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatsScope {
    /// A single test file.
    File(Utf8PathBuf),
    /// The run as a whole, at file granularity.
    Run,
}

impl fmt::Display for StatsScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file `{path}`"),
            Self::Run => write!(f, "run"),
        }
    }
}

/// Statistics for the tests sharing a first ancestor title.
#[derive(Clone, Debug)]
pub struct SuiteStats<'a> {
    /// The suite name.
    pub name: &'a str,
    /// Counters rolled up from the suite's tests, with `time` the sum of test durations.
    pub counter: StatCounter,
    /// The suite's tests, ordered by title.
    pub tests: Vec<&'a TestCaseSummary>,
}

impl<'a> SuiteStats<'a> {
    /// Returns the tests listed in a detailed breakdown: those whose title follows the `test`
    /// naming convention, in title order.
    pub fn listed_tests(&self) -> impl Iterator<Item = &'a TestCaseSummary> + '_ {
        self.tests
            .iter()
            .copied()
            .filter(|result| result.title.starts_with(TEST_TITLE_PREFIX))
    }
}

/// Titles of test methods start with this prefix.
pub const TEST_TITLE_PREFIX: &str = "test";

/// Groups test results into suites, ordered by suite name.
pub fn group_suites(results: &[TestCaseSummary]) -> Vec<SuiteStats<'_>> {
    let mut suites: BTreeMap<&str, SuiteStats<'_>> = BTreeMap::new();
    for result in results {
        let name = result.suite_name();
        let suite = suites.entry(name).or_insert_with(|| SuiteStats {
            name,
            counter: StatCounter::default(),
            tests: Vec::new(),
        });
        suite.counter = suite.counter.aggregate(result.status);
        suite.counter.time += result.duration_ms();
        suite.tests.push(result);
    }

    suites
        .into_values()
        .map(|mut suite| {
            // Stable, so tests sharing a title keep execution order.
            suite.tests.sort_by(|a, b| a.title.cmp(&b.title));
            suite
        })
        .collect()
}

/// Statistics for a single test file.
#[derive(Clone, Debug)]
pub struct FileStats<'a> {
    /// The file these statistics describe.
    pub file: &'a FileRun,
    /// Test-granularity counters for the file: the harness counters if it reported any,
    /// otherwise the recomputed ones. `time` is the file's wall-clock window.
    pub counter: StatCounter,
    /// Counters recomputed by walking the file's test results.
    pub recomputed: StatCounter,
    /// The file's suites, ordered by name.
    pub suites: Vec<SuiteStats<'a>>,
}

impl<'a> FileStats<'a> {
    /// Computes statistics for a file.
    pub fn new(file: &'a FileRun) -> Self {
        let results = &file.summary.test_results;
        let recomputed: StatCounter = results.iter().map(StatCounter::from_result).sum();
        let window = file.summary.perf_stats.elapsed_ms();

        let counter = match StatCounter::from_harness(&file.summary.counters) {
            Some(harness) => StatCounter {
                time: window,
                ..harness
            },
            None => StatCounter {
                time: window,
                ..recomputed
            },
        };

        Self {
            file,
            counter,
            recomputed,
            suites: group_suites(results),
        }
    }

    /// Returns a mismatch if the harness counters disagree with the test results.
    pub fn check_consistency(&self) -> Option<StatsMismatch> {
        let harness = StatCounter::from_harness(&self.file.summary.counters)?;
        (!harness.same_counts(&self.recomputed)).then(|| StatsMismatch {
            scope: StatsScope::File(self.file.summary.test_file_path.clone()),
            harness,
            recomputed: StatCounter {
                time: 0.0,
                ..self.recomputed
            },
        })
    }
}

/// Run-level totals, one counter per summary table row.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunStats {
    /// Files, one unit per file.
    pub files: StatCounter,
    /// Suites, one unit per suite.
    pub suites: StatCounter,
    /// Tests, one unit per test.
    pub tests: StatCounter,
    /// The average duration of a test across the run, in milliseconds.
    pub average_test_ms: f64,
}

impl RunStats {
    /// Computes run-level totals from per-file statistics and the harness's run-level counters.
    ///
    /// Returns the totals along with any disagreement between the harness counters and the
    /// recomputed ones.
    pub fn compute(
        files: &[FileStats<'_>],
        run_counters: &HarnessCounters,
        num_total_tests: Option<usize>,
    ) -> (Self, Vec<StatsMismatch>) {
        let mut mismatches: Vec<_> = files
            .iter()
            .filter_map(FileStats::check_consistency)
            .collect();

        let tests: StatCounter = files
            .iter()
            .map(|file| StatCounter {
                time: 0.0,
                ..file.counter
            })
            .sum();

        let suites = files
            .iter()
            .flat_map(|file| &file.suites)
            .filter_map(|suite| suite.counter.outcome())
            .fold(StatCounter::default(), StatCounter::aggregate);

        let recomputed_files = files
            .iter()
            .filter_map(|file| file.counter.outcome())
            .fold(StatCounter::default(), StatCounter::aggregate);
        let files_counter = match StatCounter::from_harness(run_counters) {
            Some(harness) => {
                if !harness.same_counts(&recomputed_files) {
                    mismatches.push(StatsMismatch {
                        scope: StatsScope::Run,
                        harness,
                        recomputed: recomputed_files,
                    });
                }
                harness
            }
            None => recomputed_files,
        };

        // The harness may run files on several workers in parallel, so the elapsed time of the
        // whole run undercounts. Sum up per-file windows instead.
        let total_window: f64 = files
            .iter()
            .map(|file| file.file.summary.perf_stats.elapsed_ms())
            .sum();
        let test_count = num_total_tests.unwrap_or(tests.total);
        let average_test_ms = if test_count == 0 {
            0.0
        } else {
            total_window / test_count as f64
        };

        let stats = Self {
            files: files_counter,
            suites,
            tests,
            average_test_ms,
        };
        (stats, mismatches)
    }
}
