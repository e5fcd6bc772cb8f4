// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report the results of a test run in a human-readable summary.
//!
//! The main type here is [`SummaryReporter`], which is constructed via a
//! [`SummaryReporterBuilder`].

mod anomaly;
mod displayer;
mod events;
mod helpers;
mod imp;
mod log_tree;
mod noise_filter;
mod persist;
mod stats;
#[cfg(test)]
mod test_helpers;

pub use anomaly::*;
pub use events::*;
pub use imp::*;
pub use log_tree::LogTree;
pub use noise_filter::*;
pub use persist::*;
pub use stats::*;
