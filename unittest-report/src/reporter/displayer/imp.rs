// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renders a finished run as an indented report.
//!
//! The main structure in this module is [`DisplayReporter`].

use super::formatters::{DisplayStatus, DisplayTime, summary_table};
use crate::{
    helpers::{DisplayReportPath, join_columns, wrap_line},
    reporter::{
        CollectedLog,
        anomaly::{TimingCheck, run_exceeds_estimate},
        helpers::Styles,
        log_tree::LogTree,
        stats::{FileStats, RunStats, StatCounter, SuiteStats},
    },
};
use camino::Utf8PathBuf;
use owo_colors::{OwoColorize, Style};
use std::io;
use swrite::{SWrite, swrite};
use unittest_report_metadata::TestStatus;

/// Prefix for log lines of a failed test.
const LOG_LINE_PREFIX: &str = "    ";

/// Prefix for failure messages of a failed test.
const FAILURE_MESSAGE_PREFIX: &str = "      ";

#[derive(Debug)]
pub(crate) struct DisplayReporterBuilder {
    pub(crate) should_colorize: bool,
    pub(crate) root_dir: Option<Utf8PathBuf>,
    pub(crate) wrap_width: usize,
    pub(crate) file_overhead_ms: f64,
}

impl DisplayReporterBuilder {
    pub(crate) fn build(self) -> DisplayReporter {
        let mut styles: Box<Styles> = Box::default();
        if self.should_colorize {
            styles.colorize();
        }

        DisplayReporter {
            styles,
            root_dir: self.root_dir,
            wrap_width: self.wrap_width,
            file_overhead_ms: self.file_overhead_ms,
        }
    }
}

/// Timing information for the run as a whole.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RunTiming {
    pub(crate) elapsed_secs: f64,
    pub(crate) estimated_secs: Option<f64>,
}

/// Writes report lines to the live output, and keeps a plain-text copy of each.
pub(crate) struct ReportWriter<'w> {
    live: &'w mut dyn io::Write,
    collected: CollectedLog,
}

impl<'w> ReportWriter<'w> {
    pub(crate) fn new(live: &'w mut dyn io::Write) -> Self {
        Self {
            live,
            collected: CollectedLog::new(),
        }
    }

    /// Writes a line made up of the given columns.
    pub(crate) fn log<S: AsRef<str>>(&mut self, columns: &[S]) -> io::Result<()> {
        let line = join_columns(columns);
        writeln!(self.live, "{line}")?;
        self.collected.push(&line);
        Ok(())
    }

    /// Returns the live output, for text that shouldn't be collected.
    pub(crate) fn live(&mut self) -> &mut dyn io::Write {
        &mut *self.live
    }

    pub(crate) fn into_collected(self) -> CollectedLog {
        self.collected
    }
}

/// Renders finished runs.
#[derive(Debug)]
pub(crate) struct DisplayReporter {
    styles: Box<Styles>,
    root_dir: Option<Utf8PathBuf>,
    wrap_width: usize,
    file_overhead_ms: f64,
}

impl DisplayReporter {
    /// Writes the report for a run: one block per file in execution order, then the summary.
    pub(crate) fn write_run(
        &self,
        files: &[FileStats<'_>],
        stats: &RunStats,
        timing: RunTiming,
        writer: &mut ReportWriter<'_>,
    ) -> io::Result<()> {
        for file in files {
            self.write_file(file, stats.average_test_ms, writer)?;
        }
        self.write_summary(stats, timing, writer)
    }

    fn write_file(
        &self,
        file: &FileStats<'_>,
        average_test_ms: f64,
        writer: &mut ReportWriter<'_>,
    ) -> io::Result<()> {
        let check = TimingCheck::file(
            average_test_ms,
            file.counter.total,
            self.file_overhead_ms,
            file.counter.time,
        );
        let path = DisplayReportPath {
            path: &file.file.summary.test_file_path,
            root_dir: self.root_dir.as_deref(),
        };
        writer.log(&[
            format!("File: {}", path.style(self.styles.unit_name)),
            self.status_str(&file.counter),
            self.time_str(check),
        ])?;

        if !(file.counter.needs_detail() || check.is_exceeded()) {
            return Ok(());
        }

        // Log lines that precede any suite marker go straight to the live output.
        let logs = LogTree::parse(file.file.log_lines.as_deref(), writer.live())?;
        for suite in &file.suites {
            self.write_suite(suite, &logs, average_test_ms, writer)?;
        }
        Ok(())
    }

    fn write_suite(
        &self,
        suite: &SuiteStats<'_>,
        logs: &LogTree,
        average_test_ms: f64,
        writer: &mut ReportWriter<'_>,
    ) -> io::Result<()> {
        let check = TimingCheck::suite(average_test_ms, suite.counter.total, suite.counter.time);
        writer.log(&[
            format!("  Suite: {}", suite.name.style(self.styles.unit_name)),
            self.status_str(&suite.counter),
            self.time_str(check),
        ])?;

        if !(suite.counter.needs_detail() || check.is_exceeded()) {
            return Ok(());
        }

        for test in suite.listed_tests() {
            let check = TimingCheck::new(average_test_ms, test.duration_ms());
            writer.log(&[
                format!("    Test: {}", test.title.style(self.styles.unit_name)),
                self.status_str(&StatCounter::from_status(test.status)),
                self.time_str(check),
            ])?;

            if test.status != TestStatus::Failed {
                continue;
            }
            for line in logs.lookup(suite.name, &test.title) {
                self.write_wrapped(line, LOG_LINE_PREFIX, self.styles.log_output, writer)?;
            }
            for message in &test.failure_messages {
                self.write_wrapped(
                    message,
                    FAILURE_MESSAGE_PREFIX,
                    self.styles.failure_output,
                    writer,
                )?;
            }
        }
        Ok(())
    }

    fn write_summary(
        &self,
        stats: &RunStats,
        timing: RunTiming,
        writer: &mut ReportWriter<'_>,
    ) -> io::Result<()> {
        writer.log(&["\n"])?;

        let elapsed = format!("{:.2}s", timing.elapsed_secs);
        let elapsed = if run_exceeds_estimate(timing.elapsed_secs, timing.estimated_secs) {
            elapsed.style(self.styles.slow).to_string()
        } else {
            elapsed
        };
        let mut line = format!("{}{elapsed}", "Tests finished in ".style(self.styles.bold));
        if let Some(estimated) = timing.estimated_secs {
            swrite!(line, ", estimated {estimated}s");
        }
        writer.log(&[line])?;

        for row in summary_table(stats, &self.styles) {
            writer.log(&[row])?;
        }
        Ok(())
    }

    /// Writes multi-line text, word-wrapping each line and prefixing every resulting line.
    fn write_wrapped(
        &self,
        text: &str,
        prefix: &str,
        style: Style,
        writer: &mut ReportWriter<'_>,
    ) -> io::Result<()> {
        for line in text.split('\n') {
            for wrapped in wrap_line(line, self.wrap_width) {
                writer.log(&[format!("{prefix}{}", wrapped.style(style))])?;
            }
        }
        Ok(())
    }

    fn status_str(&self, counter: &StatCounter) -> String {
        DisplayStatus {
            status: counter.status(),
            styles: &self.styles,
        }
        .to_string()
    }

    fn time_str(&self, check: TimingCheck) -> String {
        DisplayTime {
            check,
            styles: &self.styles,
        }
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::{
        FileRun,
        anomaly::DEFAULT_FILE_OVERHEAD_MS,
        test_helpers::{file_run, test_result},
    };
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use unittest_report_metadata::{HarnessCounters, PerfStats};

    fn reporter(should_colorize: bool, root_dir: Option<&str>) -> DisplayReporter {
        DisplayReporterBuilder {
            should_colorize,
            root_dir: root_dir.map(Utf8PathBuf::from),
            wrap_width: 120,
            file_overhead_ms: DEFAULT_FILE_OVERHEAD_MS,
        }
        .build()
    }

    /// Renders the given files and returns the live output along with the collected lines.
    fn render(
        reporter: &DisplayReporter,
        files: &[FileRun],
        counters: HarnessCounters,
        timing: RunTiming,
    ) -> (String, CollectedLog) {
        let file_stats: Vec<_> = files.iter().map(FileStats::new).collect();
        let (stats, mismatches) = RunStats::compute(&file_stats, &counters, None);
        assert_eq!(mismatches, Vec::new(), "fixtures are consistent");

        let mut out = Vec::new();
        let mut writer = ReportWriter::new(&mut out);
        reporter
            .write_run(&file_stats, &stats, timing, &mut writer)
            .expect("writing to a Vec succeeds");
        let collected = writer.into_collected();
        (String::from_utf8(out).expect("output is UTF-8"), collected)
    }

    fn untimed() -> RunTiming {
        RunTiming {
            elapsed_secs: 1.0,
            estimated_secs: None,
        }
    }

    fn padded(first: &str, rest: &[&str]) -> String {
        join_columns(&std::iter::once(first).chain(rest.iter().copied()).collect::<Vec<_>>())
    }

    #[test]
    fn failing_file_is_broken_down() {
        let mut failing = file_run(
            "/repo/test/math.js",
            PerfStats::new(1000.0, 1300.0),
            Some(HarnessCounters::tests(2, 0, 1)),
            vec![
                test_result("MathTest", "testAdd", TestStatus::Passed, 100.0),
                test_result("MathTest", "testMultiply", TestStatus::Failed, 100.0),
                test_result("MathTest", "helperNotListed", TestStatus::Passed, 100.0),
            ],
        );
        failing.summary.test_results[1].failure_messages =
            vec!["Expected 6 to equal 5\nat multiply".to_owned()];
        failing.log_lines = Some(vec![
            "Suite: MathTest".to_owned(),
            "  Test: testMultiply".to_owned(),
            "computing 2 * 3".to_owned(),
        ]);

        let (out, collected) = render(
            &reporter(false, Some("/repo")),
            &[failing],
            HarnessCounters::suites(0, 0, 1),
            untimed(),
        );

        // Tests whose title doesn't start with "test" are not listed.
        assert!(!out.contains("helperNotListed"));
        assert_eq!(
            collected.lines()[..7],
            [
                padded("File: .../test/math.js", &["FAIL", "300ms"]),
                padded("  Suite: MathTest", &["FAIL", "300ms"]),
                padded("    Test: testAdd", &["OK", "100ms"]),
                padded("    Test: testMultiply", &["FAIL", "100ms"]),
                padded("      computing 2 * 3", &[]),
                padded("        Expected 6 to equal 5", &[]),
                padded("        at multiply", &[]),
            ]
        );
        assert_eq!(collected.lines()[7], padded("\n", &[]));
        assert_eq!(collected.lines()[8], padded("Tests finished in 1.00s", &[]));
    }

    #[test]
    fn passing_run_report() {
        let passing = file_run(
            "test/a.js",
            PerfStats::new(0.0, 300.0),
            Some(HarnessCounters::tests(2, 0, 0)),
            vec![
                test_result("A", "testOne", TestStatus::Passed, 100.0),
                test_result("A", "testTwo", TestStatus::Passed, 100.0),
            ],
        );
        let (out, collected) = render(
            &reporter(false, None),
            &[passing],
            HarnessCounters::suites(1, 0, 0),
            RunTiming {
                elapsed_secs: 2.5,
                estimated_secs: Some(4.0),
            },
        );

        let summary = indoc! {"
            Tests finished in 2.50s, estimated 4s
            ┌─────────┬────────┬─────────┬────────┬───────┐
            │ (index) │ Failed │ Skipped │ Passed │ Total │
            ├─────────┼────────┼─────────┼────────┼───────┤
            │ Files   │ 0      │ 0       │ 1      │ 1     │
            │ Suites  │ 0      │ 0       │ 1      │ 1     │
            │ Tests   │ 0      │ 0       │ 2      │ 2     │
            └─────────┴────────┴─────────┴────────┴───────┘"
        };
        let expected: Vec<String> = [
            padded("File: test/a.js", &["OK", "300ms"]),
            padded("\n", &[]),
        ]
        .into_iter()
        .chain(summary.lines().map(|line| padded(line, &[])))
        .collect();
        assert_eq!(collected.lines(), expected);
        assert_eq!(
            collected.lines()[3].chars().count(),
            70,
            "table rows are padded like any other line"
        );
        assert_eq!(out, format!("{}\n", collected.contents()), "no colors");
    }

    #[test]
    fn slow_file_is_expanded() {
        // The average test takes (300 + 2700) / 4 = 750ms, so the slow file is expected to take
        // 750 + 600 = 1350ms.
        let fast = file_run(
            "fast.js",
            PerfStats::new(0.0, 300.0),
            Some(HarnessCounters::tests(3, 0, 0)),
            vec![
                test_result("Fast", "testOne", TestStatus::Passed, 100.0),
                test_result("Fast", "testTwo", TestStatus::Passed, 100.0),
                test_result("Fast", "testThree", TestStatus::Passed, 100.0),
            ],
        );
        let slow = file_run(
            "slow.js",
            PerfStats::new(0.0, 2700.0),
            Some(HarnessCounters::tests(1, 0, 0)),
            vec![test_result("Slow", "testSlow", TestStatus::Passed, 1600.0)],
        );
        let (_, collected) = render(
            &reporter(false, None),
            &[fast, slow],
            HarnessCounters::suites(2, 0, 0),
            untimed(),
        );

        assert_eq!(
            collected.lines()[..5],
            [
                padded("File: fast.js", &["OK", "300ms"]),
                padded("File: slow.js", &["OK", "2700ms >> expected 1350ms"]),
                padded("  Suite: Slow", &["OK", "1600ms >> expected 750ms"]),
                padded("    Test: testSlow", &["OK", "1600ms >> expected 750ms"]),
                padded("\n", &[]),
            ]
        );
    }

    #[test]
    fn colorized_output_is_collected_plain() {
        let failing = file_run(
            "a.js",
            PerfStats::new(0.0, 10.0),
            Some(HarnessCounters::tests(0, 1, 0)),
            vec![test_result("S", "testSkipped", TestStatus::Pending, 0.0)],
        );
        let (out, collected) = render(
            &reporter(true, None),
            &[failing],
            HarnessCounters::suites(0, 1, 0),
            RunTiming {
                elapsed_secs: 9.0,
                estimated_secs: Some(2.0),
            },
        );

        assert_ne!(out, format!("{}\n", collected.contents()));
        assert_eq!(strip_ansi_escapes::strip_str(&out), format!("{}\n", collected.contents()));
        assert_eq!(
            collected.lines()[1],
            padded("  Suite: S", &["SKIPPED", "0ms"])
        );
        assert!(
            collected
                .lines()
                .contains(&padded("Tests finished in 9.00s, estimated 2s", &[]))
        );
    }

    #[test]
    fn empty_run_renders_summary_only() {
        let (out, collected) = render(
            &reporter(false, None),
            &[],
            HarnessCounters::default(),
            RunTiming {
                elapsed_secs: 0.0,
                estimated_secs: None,
            },
        );
        assert_eq!(collected.lines()[0], padded("\n", &[]));
        assert_eq!(collected.lines()[1], padded("Tests finished in 0.00s", &[]));
        assert_eq!(collected.lines().len(), 2 + 7);
        assert!(
            out.trim_end()
                .ends_with("└─────────┴────────┴─────────┴────────┴───────┘")
        );
        assert!(out.starts_with(&format!("\n{}\n", " ".repeat(69))));
    }

    #[test]
    fn rendering_is_repeatable() {
        let file = file_run(
            "a.js",
            PerfStats::new(0.0, 10.0),
            Some(HarnessCounters::tests(0, 0, 1)),
            vec![test_result("S", "testA", TestStatus::Failed, 5.0)],
        );
        let reporter = reporter(false, None);
        let first = render(
            &reporter,
            std::slice::from_ref(&file),
            HarnessCounters::suites(0, 0, 1),
            untimed(),
        );
        let second = render(
            &reporter,
            std::slice::from_ref(&file),
            HarnessCounters::suites(0, 0, 1),
            untimed(),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn unattributed_log_lines_are_printed_live_only() {
        let mut file = file_run(
            "a.js",
            PerfStats::new(0.0, 10.0),
            Some(HarnessCounters::tests(0, 0, 1)),
            vec![test_result("S", "testA", TestStatus::Failed, 5.0)],
        );
        file.log_lines = Some(vec!["setup noise".to_owned(), "Suite: S".to_owned()]);
        let (out, collected) = render(
            &reporter(false, None),
            &[file],
            HarnessCounters::suites(0, 0, 1),
            untimed(),
        );
        assert!(out.contains("setup noise\n"));
        assert!(!collected.lines().iter().any(|line| line.contains("setup noise")));
    }
}
