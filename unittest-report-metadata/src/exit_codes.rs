// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `unittest-report` failures.
///
/// `unittest-report` runs may fail for a variety of reasons. This structure documents the exit
/// codes that may occur in case of expected failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum ReportExitCode {}

impl ReportExitCode {
    /// The report was produced and every test in it passed or was skipped.
    pub const OK: i32 = 0;

    /// The report was produced, and one or more tests failed.
    pub const TESTS_FAILED: i32 = 100;

    /// The harness results document could not be read or parsed.
    pub const RESULTS_READ_FAILED: i32 = 97;

    /// A user issue happened while setting up a report invocation, for example an invalid config
    /// file.
    pub const SETUP_ERROR: i32 = 96;

    /// Writing the report to stdout, stderr or the report directory produced an error.
    pub const REPORT_WRITE_FAILED: i32 = 110;
}
