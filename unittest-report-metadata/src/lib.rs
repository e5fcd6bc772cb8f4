// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Structured access to the machine-readable results of a unit test harness run.
//!
//! The types here mirror the JSON document a harness produces once all test files have
//! executed: a [`RunSummary`] containing one [`FileRunSummary`] per test file, each of which
//! contains one [`TestCaseSummary`] per test.

mod errors;
mod exit_codes;
mod harness;

pub use errors::*;
pub use exit_codes::*;
pub use harness::*;
