// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by the report engine.

use crate::reporter::{StatCounter, StatsScope};
use camino::Utf8PathBuf;
use config::ConfigError;
use std::{error::Error, fmt};
use thiserror::Error;

/// An error that occurred while parsing the config.
#[derive(Debug, Error)]
#[error("failed to parse unittest-report config at `{config_file}`")]
#[non_exhaustive]
pub struct ConfigParseError {
    config_file: Utf8PathBuf,
    #[source]
    kind: ConfigParseErrorKind,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: impl Into<Utf8PathBuf>, kind: ConfigParseErrorKind) -> Self {
        Self {
            config_file: config_file.into(),
            kind,
        }
    }

    /// Returns the config file for this error.
    pub fn config_file(&self) -> &Utf8PathBuf {
        &self.config_file
    }

    /// Returns the kind of error this is.
    pub fn kind(&self) -> &ConfigParseErrorKind {
        &self.kind
    }
}

/// The kind of error that occurred while parsing a config.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseErrorKind {
    /// An error occurred while building the config.
    #[error(transparent)]
    BuildError(Box<ConfigError>),

    /// An error occurred while deserializing the config.
    #[error(transparent)]
    DeserializeError(Box<serde_path_to_error::Error<ConfigError>>),
}

/// The counters computed by walking test results disagree with the counters reported by the
/// harness.
///
/// This indicates a bug either in the harness or in aggregation, so it is reported loudly rather
/// than reconciled.
#[derive(Clone, Debug, Error, PartialEq)]
#[error(
    "{scope}: harness reported {} passing, {} pending, {} failing, \
     but results contain {} passing, {} pending, {} failing",
    harness.passing, harness.pending, harness.failing,
    recomputed.passing, recomputed.pending, recomputed.failing,
)]
pub struct StatsMismatch {
    /// The unit whose counters disagree.
    pub scope: StatsScope,

    /// The counters read from the harness output.
    pub harness: StatCounter,

    /// The counters recomputed from test results.
    pub recomputed: StatCounter,
}

/// An error that occurs while writing the collected report to the report directory.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PersistError {
    /// The report directory could not be created.
    #[error("error creating report directory `{dir}`")]
    CreateDir {
        /// The directory that could not be created.
        dir: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: std::io::Error,
    },

    /// The report file could not be written.
    #[error("error writing report to `{file}`")]
    Write {
        /// The file that could not be written.
        file: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: atomicwrites::Error<std::io::Error>,
    },
}

/// An error that occurs while reporting a run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    /// An error occurred while writing to the live output.
    #[error("error writing to output")]
    Io(#[source] std::io::Error),

    /// An error occurred while persisting the collected report.
    #[error("error persisting collected report")]
    Persist(#[from] PersistError),
}

/// Displays an error and its chain of sources, one per line.
pub struct DisplayErrorChain<E> {
    error: E,
}

impl<E: Error> DisplayErrorChain<E> {
    /// Creates a new chain displayer for the given error.
    pub fn new(error: E) -> Self {
        Self { error }
    }
}

impl<E: Error> fmt::Display for DisplayErrorChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        let mut source = self.error.source();
        while let Some(error) = source {
            write!(f, "\n  caused by:\n  - {error}")?;
            source = error.source();
        }

        Ok(())
    }
}
