// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError,
    errors::Result,
    output::{OutputContext, OutputOpts, OutputWriter},
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser};
use unittest_report::{config::ReportConfig, reporter::SummaryReporterBuilder};
use unittest_report_metadata::{ReportExitCode, RunSummary};

/// Summarizes the results of a unit test harness run.
///
/// Prints an indented report of every test file, breaking failing and unusually slow files down
/// to individual tests, followed by a table of totals.
#[derive(Debug, Parser)]
#[command(version, name = "unittest-report", styles = crate::output::clap_styles::style())]
pub struct ReportApp {
    /// Path to the harness results JSON, or `-` to read from standard input
    #[arg(value_name = "RESULTS")]
    results: Utf8PathBuf,

    #[command(flatten)]
    output: OutputOpts,

    #[command(flatten)]
    report: ReportOpts,
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Report options")]
struct ReportOpts {
    /// Directory to write a plain-text copy of the report to
    #[arg(long, value_name = "DIR")]
    report_dir: Option<Utf8PathBuf>,

    /// Expected duration of the run, in seconds
    #[arg(long, value_name = "SECS")]
    estimated_time: Option<f64>,

    /// Test file paths under this directory are abbreviated
    #[arg(long, value_name = "DIR")]
    root_dir: Option<Utf8PathBuf>,

    /// Config file [default: current-dir/.config/unittest-report.toml]
    #[arg(long, value_name = "PATH")]
    config_file: Option<Utf8PathBuf>,
}

impl ReportOpts {
    fn make_config(&self, workspace_root: &Utf8Path) -> Result<ReportConfig> {
        Ok(ReportConfig::from_sources(workspace_root, self.config_file.as_deref())?)
    }

    fn apply(&self, builder: &mut SummaryReporterBuilder) {
        if let Some(report_dir) = &self.report_dir {
            builder.set_report_dir(report_dir.clone());
        }
        if let Some(estimated_time) = self.estimated_time {
            builder.set_estimated_time(estimated_time);
        }
        if let Some(root_dir) = &self.root_dir {
            builder.set_root_dir(root_dir.clone());
        }
    }
}

impl ReportApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app, returning the process exit code on success.
    pub fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        let current_dir =
            std::env::current_dir().map_err(|err| ExpectedError::CurrentDirFailed { err })?;
        let workspace_root = Utf8PathBuf::try_from(current_dir)
            .map_err(|err| ExpectedError::CurrentDirInvalidUtf8 { err })?;
        self.exec_in(&workspace_root, output, output_writer)
    }

    fn exec_in(
        self,
        workspace_root: &Utf8Path,
        output: OutputContext,
        output_writer: &mut OutputWriter,
    ) -> Result<i32> {
        let config = self.report.make_config(workspace_root)?;
        let summary = read_results(&self.results)?;

        let mut builder = SummaryReporterBuilder::from_config(&config);
        builder.set_colorize(output.color.should_colorize(supports_color::Stream::Stderr));
        if output.verbose {
            builder.set_verbose(true);
        }
        self.report.apply(&mut builder);

        let mut reporter = builder.build(output_writer.reporter_output());
        let outcome = reporter.report_run(summary)?;
        if let Some(path) = &outcome.report_path {
            tracing::debug!("wrote report to {path}");
        }

        if outcome.is_success() {
            Ok(ReportExitCode::OK)
        } else {
            Ok(ReportExitCode::TESTS_FAILED)
        }
    }
}

fn read_results(path: &Utf8Path) -> Result<RunSummary> {
    let summary = if path == "-" {
        RunSummary::from_reader(std::io::stdin().lock())
    } else {
        std::fs::File::open(path)
            .map_err(unittest_report_metadata::ResultsReadError::Io)
            .and_then(RunSummary::from_reader)
    };
    summary.map_err(|err| ExpectedError::results_read_error(path, err))
}
