// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for `unittest-report`.
//!
//! A run's results arrive one test file at a time through [`reporter::RunListener`]. Each file's
//! captured console output is cleaned and grouped by suite and test, pass/fail/timing statistics
//! are rolled up to suite, file and run level, and the whole run is rendered as an indented report
//! with slow units highlighted. A plain-text copy of the report can be written to disk.

pub mod config;
pub mod errors;
mod helpers;
pub mod reporter;
