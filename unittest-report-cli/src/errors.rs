// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::StderrStyles;
use camino::{FromPathBufError, Utf8PathBuf};
use owo_colors::OwoColorize;
use std::error::Error;
use thiserror::Error;
use unittest_report::errors::{ConfigParseError, DisplayErrorChain, ReportError};
use unittest_report_metadata::{ReportExitCode, ResultsReadError};

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An error that is expected to happen in the course of normal operation, such as a missing
/// results file or an invalid config.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("could not determine current directory")]
    CurrentDirFailed { err: std::io::Error },
    #[error("current directory is not valid UTF-8")]
    CurrentDirInvalidUtf8 { err: FromPathBufError },
    #[error("config parse error")]
    ConfigParseError {
        #[from]
        err: ConfigParseError,
    },
    #[error("results read error")]
    ResultsReadError {
        path: Utf8PathBuf,
        #[source]
        err: ResultsReadError,
    },
    #[error("report error")]
    ReportError {
        #[from]
        err: ReportError,
    },
}

impl ExpectedError {
    pub(crate) fn results_read_error(path: impl Into<Utf8PathBuf>, err: ResultsReadError) -> Self {
        Self::ResultsReadError {
            path: path.into(),
            err,
        }
    }

    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::CurrentDirFailed { .. }
            | Self::CurrentDirInvalidUtf8 { .. }
            | Self::ConfigParseError { .. } => ReportExitCode::SETUP_ERROR,
            Self::ResultsReadError { .. } => ReportExitCode::RESULTS_READ_FAILED,
            Self::ReportError { .. } => ReportExitCode::REPORT_WRITE_FAILED,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let (heading, source) = self.heading_and_source(styles);
        tracing::error!("{heading}");
        if let Some(source) = source {
            tracing::error!(
                target: "unittest_report_cli::no_heading",
                "\nCaused by:\n  {}",
                DisplayErrorChain::new(source)
            );
        }
    }

    fn heading_and_source(&self, styles: &StderrStyles) -> (String, Option<&dyn Error>) {
        match self {
            Self::CurrentDirFailed { err } => (
                "could not determine current directory".to_owned(),
                Some(err as &dyn Error),
            ),
            Self::CurrentDirInvalidUtf8 { err } => (
                "current directory is not valid UTF-8".to_owned(),
                Some(err as &dyn Error),
            ),
            Self::ConfigParseError { err } => (
                format!(
                    "failed to parse config at `{}`",
                    err.config_file().style(styles.bold)
                ),
                Some(err.kind() as &dyn Error),
            ),
            Self::ResultsReadError { path, err } => (
                format!(
                    "failed to read harness results from `{}`",
                    path.style(styles.bold)
                ),
                Some(err as &dyn Error),
            ),
            Self::ReportError { err } => (
                "failed to produce report".to_owned(),
                Some(err as &dyn Error),
            ),
        }
    }
}
