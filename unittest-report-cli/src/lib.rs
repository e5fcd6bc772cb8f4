// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Summarizes the results of a unit test harness run.
//!
//! Reads the harness's JSON results document, prints an indented report with failing and slow
//! units broken down to the test level, and optionally writes a plain-text copy of the report to
//! a directory.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::{OutputContext, OutputWriter, StderrStyles};
