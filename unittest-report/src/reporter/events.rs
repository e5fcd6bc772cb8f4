// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Events delivered to a [`RunListener`](super::RunListener), and the outcome of a run.

use super::{CollectedLog, RunStats};
use crate::errors::StatsMismatch;
use camino::Utf8PathBuf;
use unittest_report_metadata::{FileRunSummary, HarnessCounters, RunSummary};

/// The start of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunStart {
    /// When the run started, in milliseconds since the epoch.
    pub start_time: f64,

    /// The expected duration of the run in seconds, if known.
    pub estimated_time: Option<f64>,
}

impl RunStart {
    /// Returns the start event for a run summary.
    pub fn from_summary(summary: &RunSummary) -> Self {
        Self {
            start_time: summary.start_time,
            estimated_time: None,
        }
    }
}

/// The end of a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunCompletion {
    /// When the run finished, in milliseconds since the epoch.
    pub end_time: f64,

    /// The total number of tests the harness reports for the run, if any.
    pub num_total_tests: Option<usize>,

    /// Run-level counters, at file granularity.
    pub counters: HarnessCounters,
}

/// A test file result, together with its cleaned log lines.
#[derive(Clone, Debug, PartialEq)]
pub struct FileRun {
    /// The result reported by the harness. If log lines were extracted, the aggregated failure
    /// message has been cleared.
    pub summary: FileRunSummary,

    /// Cleaned log lines, or `None` if the file's console output wasn't used.
    pub log_lines: Option<Vec<String>>,
}

/// The result of reporting a run.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    /// Run-level totals, as shown in the summary table.
    pub stats: RunStats,

    /// Disagreements between harness counters and recomputed counters.
    pub mismatches: Vec<StatsMismatch>,

    /// The plain-text copy of everything the renderer printed.
    pub collected: CollectedLog,

    /// The path the collected report was written to, if a report directory was set.
    pub report_path: Option<Utf8PathBuf>,
}

impl RunOutcome {
    /// Returns true if no test file failed.
    pub fn is_success(&self) -> bool {
        self.stats.files.failing == 0 && self.stats.tests.failing == 0
    }
}
