// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classifies durations against an expected baseline.

/// Fixed setup cost added to the expected duration of every test file, in milliseconds.
pub const DEFAULT_FILE_OVERHEAD_MS: f64 = 600.0;

/// How far a duration is over its expected value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimingAnomaly {
    /// At most 1.5× the expected duration.
    Normal,
    /// Over 1.5× and at most 2× the expected duration.
    Slow,
    /// Over 2× the expected duration.
    VerySlow,
}

impl TimingAnomaly {
    /// Classifies `actual` against `expected`.
    pub fn classify(expected: f64, actual: f64) -> Self {
        if actual > expected * 2.0 {
            Self::VerySlow
        } else if actual > expected * 1.5 {
            Self::Slow
        } else {
            Self::Normal
        }
    }

    /// Returns true if the duration exceeded its expected value enough to be flagged.
    pub fn is_exceeded(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// A duration together with its baseline and classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingCheck {
    /// The expected duration in milliseconds.
    pub expected: f64,
    /// The actual duration in milliseconds.
    pub actual: f64,
    /// The classification of `actual` against `expected`.
    pub anomaly: TimingAnomaly,
}

impl TimingCheck {
    /// Checks `actual` against `expected`.
    pub fn new(expected: f64, actual: f64) -> Self {
        Self {
            expected,
            actual,
            anomaly: TimingAnomaly::classify(expected, actual),
        }
    }

    /// Checks a suite's duration: each of its tests is expected to take the average test time.
    pub fn suite(average_test_ms: f64, test_count: usize, actual: f64) -> Self {
        Self::new(average_test_ms * test_count as f64, actual)
    }

    /// Checks a file's duration: each of its tests is expected to take the average test time,
    /// plus a fixed overhead for setting up the file.
    pub fn file(average_test_ms: f64, test_count: usize, overhead_ms: f64, actual: f64) -> Self {
        Self::new(average_test_ms * test_count as f64 + overhead_ms, actual)
    }

    /// Returns true if the duration was flagged.
    pub fn is_exceeded(&self) -> bool {
        self.anomaly.is_exceeded()
    }
}

/// Returns true if a run's elapsed time exceeds its estimate by more than a second.
///
/// Without an estimate there is nothing to check against.
pub fn run_exceeds_estimate(elapsed_secs: f64, estimated_secs: Option<f64>) -> bool {
    estimated_secs.is_some_and(|estimate| elapsed_secs - 1.0 > estimate)
}
