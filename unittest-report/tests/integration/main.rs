// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests that report whole runs read from harness results documents.

mod basic;
mod fixtures;
