// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::{error, fmt};

/// An error that occurs while reading a harness results document.
#[derive(Debug)]
pub enum ResultsReadError {
    /// Reading the document from its source failed.
    Io(std::io::Error),

    /// Error parsing JSON output.
    Json(serde_json::Error),
}

impl fmt::Display for ResultsReadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io(_) => {
                write!(f, "reading harness results failed")
            }
            Self::Json(err) => {
                write!(
                    f,
                    "parsing harness results JSON failed at line {}, column {}",
                    err.line(),
                    err.column()
                )
            }
        }
    }
}

impl error::Error for ResultsReadError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}
