// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The displayer for human-friendly output.

mod formatters;
mod imp;

pub(crate) use imp::*;
