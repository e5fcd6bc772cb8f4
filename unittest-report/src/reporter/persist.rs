// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The plain-text copy of a report, and writing it out to disk.

use crate::errors::PersistError;
use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write;

/// The name of the file the collected report is written to, inside the report directory.
pub const REPORT_FILE_NAME: &str = "unittest";

/// Every line of a rendered report, with ANSI escapes removed, in emission order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectedLog {
    lines: Vec<String>,
}

impl CollectedLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line, stripping any ANSI escapes from it.
    pub fn push(&mut self, line: &str) {
        self.lines.push(strip_ansi_escapes::strip_str(line));
    }

    /// Returns the collected lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the lines joined with newlines, without a trailing newline.
    pub fn contents(&self) -> String {
        self.lines.join("\n")
    }
}

/// Writes the collected log to [`REPORT_FILE_NAME`] inside `dir`, creating `dir` if necessary.
///
/// The file is replaced atomically, so readers never observe a partially written report.
/// Returns the path written to.
pub fn write_collected_log(
    dir: &Utf8Path,
    log: &CollectedLog,
) -> Result<Utf8PathBuf, PersistError> {
    std::fs::create_dir_all(dir).map_err(|error| PersistError::CreateDir {
        dir: dir.to_owned(),
        error,
    })?;

    let file = dir.join(REPORT_FILE_NAME);
    let contents = log.contents();
    atomicwrites::AtomicFile::new(&file, atomicwrites::AllowOverwrite)
        .write(|f| f.write_all(contents.as_bytes()))
        .map_err(|error| PersistError::Write {
            file: file.clone(),
            error,
        })?;

    tracing::debug!(%file, lines = log.lines().len(), "wrote collected report");
    Ok(file)
}
