// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collects per-file results over the course of a run, and reports on them once it finishes.
//!
//! The main structure in this module is [`SummaryReporter`].

use super::{
    CollectedLog, DEFAULT_FILE_OVERHEAD_MS,
    displayer::{DisplayReporter, DisplayReporterBuilder, ReportWriter, RunTiming},
    events::*,
    noise_filter::filter_file_output,
    persist::write_collected_log,
    stats::{FileStats, RunStats},
};
use crate::{config::ReportConfig, errors::ReportError};
use camino::Utf8PathBuf;
use std::io::{self, BufWriter, Write};
use unittest_report_metadata::{FileRunSummary, RunSummary};

/// Destination for live report output.
///
/// This is usually a terminal, but can be an in-memory buffer for tests.
pub enum ReporterOutput<'a> {
    /// Produce output on standard error.
    Terminal,

    /// Write output to a buffer.
    Buffer(&'a mut Vec<u8>),
}

impl ReporterOutput<'_> {
    fn with_writer<T>(
        &mut self,
        f: impl FnOnce(&mut dyn io::Write) -> io::Result<T>,
    ) -> io::Result<T> {
        match self {
            Self::Terminal => {
                let mut writer = BufWriter::new(io::stderr());
                let ret = f(&mut writer)?;
                writer.flush()?;
                Ok(ret)
            }
            Self::Buffer(buf) => f(&mut **buf),
        }
    }
}

/// Receives the results of a run as it progresses.
pub trait RunListener {
    /// The error type returned by this listener.
    type Error;

    /// Called once, before any file results.
    fn on_run_start(&mut self, start: RunStart) -> Result<(), Self::Error>;

    /// Called once per test file, in execution order.
    fn on_test_file_result(&mut self, summary: FileRunSummary) -> Result<(), Self::Error>;

    /// Called once after the last file result.
    fn on_run_complete(&mut self, completion: RunCompletion) -> Result<RunOutcome, Self::Error>;
}

/// Summary reporter builder.
#[derive(Debug)]
pub struct SummaryReporterBuilder {
    verbose: bool,
    should_colorize: bool,
    report_dir: Option<Utf8PathBuf>,
    estimated_time: Option<f64>,
    root_dir: Option<Utf8PathBuf>,
    wrap_width: usize,
    file_overhead_ms: f64,
}

impl Default for SummaryReporterBuilder {
    fn default() -> Self {
        Self {
            verbose: false,
            should_colorize: false,
            report_dir: None,
            estimated_time: None,
            root_dir: None,
            wrap_width: ReportConfig::DEFAULT_WRAP_WIDTH,
            file_overhead_ms: DEFAULT_FILE_OVERHEAD_MS,
        }
    }
}

impl SummaryReporterBuilder {
    /// Creates a builder initialized from the given config.
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            verbose: config.verbose,
            should_colorize: false,
            report_dir: config.report_dir.clone(),
            estimated_time: config.estimated_time,
            root_dir: config.root_dir.clone(),
            wrap_width: config.wrap_width,
            file_overhead_ms: config.file_overhead_ms,
        }
    }

    /// Sets verbose mode, which changes how console output is indented before cleaning.
    pub fn set_verbose(&mut self, verbose: bool) -> &mut Self {
        self.verbose = verbose;
        self
    }

    /// Set to true if the reporter should colorize output.
    pub fn set_colorize(&mut self, should_colorize: bool) -> &mut Self {
        self.should_colorize = should_colorize;
        self
    }

    /// Sets the directory the plain-text report is written to.
    pub fn set_report_dir(&mut self, report_dir: impl Into<Utf8PathBuf>) -> &mut Self {
        self.report_dir = Some(report_dir.into());
        self
    }

    /// Sets the expected duration of the run, in seconds.
    ///
    /// An estimate passed in through [`RunStart`] takes precedence.
    pub fn set_estimated_time(&mut self, estimated_time: f64) -> &mut Self {
        self.estimated_time = Some(estimated_time);
        self
    }

    /// Sets the directory that is abbreviated in test file paths.
    pub fn set_root_dir(&mut self, root_dir: impl Into<Utf8PathBuf>) -> &mut Self {
        self.root_dir = Some(root_dir.into());
        self
    }

    /// Sets the width failure messages and log lines are wrapped to.
    pub fn set_wrap_width(&mut self, wrap_width: usize) -> &mut Self {
        self.wrap_width = wrap_width;
        self
    }

    /// Sets the fixed setup cost added to the expected duration of each file, in milliseconds.
    pub fn set_file_overhead_ms(&mut self, file_overhead_ms: f64) -> &mut Self {
        self.file_overhead_ms = file_overhead_ms;
        self
    }
}

impl SummaryReporterBuilder {
    /// Creates a new summary reporter.
    pub fn build<'a>(&self, output: ReporterOutput<'a>) -> SummaryReporter<'a> {
        let display_reporter = DisplayReporterBuilder {
            should_colorize: self.should_colorize,
            root_dir: self.root_dir.clone(),
            wrap_width: self.wrap_width,
            file_overhead_ms: self.file_overhead_ms,
        }
        .build();

        SummaryReporter {
            display_reporter,
            output,
            verbose: self.verbose,
            report_dir: self.report_dir.clone(),
            estimated_time: self.estimated_time,
            run_start: None,
            files: Vec::new(),
        }
    }
}

/// Prints a summary of a test run, and optionally writes a plain-text copy of it to disk.
pub struct SummaryReporter<'a> {
    display_reporter: DisplayReporter,
    output: ReporterOutput<'a>,
    verbose: bool,
    report_dir: Option<Utf8PathBuf>,
    estimated_time: Option<f64>,
    run_start: Option<RunStart>,
    files: Vec<FileRun>,
}

impl SummaryReporter<'_> {
    /// Reports a whole run at once, from a harness results document.
    pub fn report_run(&mut self, summary: RunSummary) -> Result<RunOutcome, ReportError> {
        let start = RunStart::from_summary(&summary);
        let end_time = summary.start_time + summary.elapsed_ms();
        let RunSummary {
            num_total_tests,
            counters,
            test_results,
            ..
        } = summary;

        self.on_run_start(start)?;
        for file in test_results {
            self.on_test_file_result(file)?;
        }
        self.on_run_complete(RunCompletion {
            end_time,
            num_total_tests,
            counters,
        })
    }
}

impl RunListener for SummaryReporter<'_> {
    type Error = ReportError;

    fn on_run_start(&mut self, start: RunStart) -> Result<(), ReportError> {
        tracing::debug!(start_time = start.start_time, "run started");
        self.files.clear();
        self.run_start = Some(start);
        Ok(())
    }

    fn on_test_file_result(&mut self, mut summary: FileRunSummary) -> Result<(), ReportError> {
        let log_lines = filter_file_output(&mut summary, self.verbose);

        // Unless it was replaced by the cleaned console output, the harness's aggregated
        // failure message is shown as soon as the file finishes.
        if let Some(message) = summary.failure_message.as_deref().filter(|m| !m.is_empty()) {
            self.output
                .with_writer(|writer| writeln!(writer, "{message}"))
                .map_err(ReportError::Io)?;
        }

        tracing::debug!(
            file = %summary.test_file_path,
            results = summary.test_results.len(),
            log_lines = log_lines.as_ref().map(Vec::len),
            "collected file result"
        );
        self.files.push(FileRun { summary, log_lines });
        Ok(())
    }

    fn on_run_complete(&mut self, completion: RunCompletion) -> Result<RunOutcome, ReportError> {
        let start = self.run_start.take().unwrap_or(RunStart {
            start_time: completion.end_time,
            estimated_time: None,
        });
        // A zero estimate means no estimate was made.
        let is_estimate = |estimate: &f64| *estimate != 0.0;
        let timing = RunTiming {
            elapsed_secs: ((completion.end_time - start.start_time) / 1000.0).max(0.0),
            estimated_secs: start
                .estimated_time
                .filter(is_estimate)
                .or(self.estimated_time.filter(is_estimate)),
        };

        let files = std::mem::take(&mut self.files);
        let file_stats: Vec<_> = files.iter().map(FileStats::new).collect();
        let (stats, mismatches) = RunStats::compute(
            &file_stats,
            &completion.counters,
            completion.num_total_tests,
        );
        for mismatch in &mismatches {
            tracing::error!("inconsistent test counts for {mismatch}");
        }

        let display_reporter = &self.display_reporter;
        let collected: CollectedLog = self
            .output
            .with_writer(|live| {
                let mut writer = ReportWriter::new(live);
                display_reporter.write_run(&file_stats, &stats, timing, &mut writer)?;
                Ok(writer.into_collected())
            })
            .map_err(ReportError::Io)?;

        let report_path = match &self.report_dir {
            Some(dir) => Some(write_collected_log(dir, &collected)?),
            None => None,
        };

        Ok(RunOutcome {
            stats,
            mismatches,
            collected,
            report_path,
        })
    }
}
