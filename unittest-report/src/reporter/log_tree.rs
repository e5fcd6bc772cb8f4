// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reconstructs the suite → test → lines structure of a file's log stream.
//!
//! Test suites announce themselves in the console output with two marker lines: `Suite: <name>`
//! once before any of the suite's tests run, and `  Test: <name>` (or `  Only Test: <name>`)
//! before each test. Every other line belongs to the most recently announced test.

use regex::Regex;
use std::{collections::BTreeMap, io, sync::LazyLock};

static SUITE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".*Suite: (.*)").expect("suite marker regex is valid"));
static TEST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".*Test: (.*)").expect("test marker regex is valid"));

/// Cleaned log lines grouped by suite and test.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogTree {
    recorded: bool,
    suites: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl LogTree {
    /// Returns a tree for a file with no recorded log lines. Every lookup returns nothing.
    pub fn not_recorded() -> Self {
        Self::default()
    }

    /// Parses a log stream.
    ///
    /// Lines that can't be attributed to a test, because no suite or test has been announced
    /// yet, are written to `fallback` immediately rather than dropped.
    pub fn parse<S: AsRef<str>>(
        lines: Option<&[S]>,
        fallback: &mut dyn io::Write,
    ) -> io::Result<Self> {
        let Some(lines) = lines else {
            return Ok(Self::not_recorded());
        };

        let mut suites: BTreeMap<String, BTreeMap<String, Vec<String>>> = BTreeMap::new();
        let mut current_suite: Option<String> = None;
        let mut current_test: Option<String> = None;

        for line in lines {
            let line = line.as_ref();
            if let Some(captures) = SUITE_MARKER.captures(line) {
                let name = captures[1].to_owned();
                suites.entry(name.clone()).or_default();
                current_suite = Some(name);
                continue;
            }

            if let Some(captures) = TEST_MARKER.captures(line) {
                let name = captures[1].to_owned();
                if let Some(suite) = current_suite.as_ref().and_then(|s| suites.get_mut(s)) {
                    suite.entry(name.clone()).or_default();
                }
                current_test = Some(name);
                continue;
            }

            let bucket = current_suite
                .as_ref()
                .zip(current_test.as_ref())
                .and_then(|(suite, test)| suites.get_mut(suite)?.get_mut(test));
            match bucket {
                Some(bucket) => bucket.push(line.to_owned()),
                None => {
                    tracing::debug!(
                        line,
                        "log line precedes any suite or test marker, printing directly"
                    );
                    writeln!(fallback, "{line}")?;
                }
            }
        }

        Ok(Self {
            recorded: true,
            suites,
        })
    }

    /// Returns true if a log stream was recorded, even if it had no lines.
    pub fn is_recorded(&self) -> bool {
        self.recorded
    }

    /// Returns the lines logged by the given test, or an empty slice if there are none.
    pub fn lookup(&self, suite: &str, test: &str) -> &[String] {
        self.suites
            .get(suite)
            .and_then(|tests| tests.get(test))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
