// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::Utf8PathBuf;
use unittest_report::reporter::{ReporterOutput, RunOutcome, SummaryReporterBuilder};
use unittest_report_metadata::RunSummary;

/// The root directory the fixture file paths live under.
pub(crate) const FIXTURE_ROOT: &str = "/work/project";

pub(crate) fn fixture_path(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub(crate) fn load_fixture(name: &str) -> RunSummary {
    let path = fixture_path(name);
    let file = std::fs::File::open(&path)
        .unwrap_or_else(|error| panic!("failed to open fixture {path}: {error}"));
    RunSummary::from_reader(file)
        .unwrap_or_else(|error| panic!("failed to parse fixture {path}: {error}"))
}

/// Reports a fixture run with the given builder, returning the outcome and the live output.
pub(crate) fn report_fixture(
    name: &str,
    builder: &mut SummaryReporterBuilder,
) -> (RunOutcome, String) {
    let mut out = Vec::new();
    let outcome = builder
        .set_root_dir(FIXTURE_ROOT)
        .build(ReporterOutput::Buffer(&mut out))
        .report_run(load_fixture(name))
        .expect("run reported");
    (outcome, String::from_utf8(out).expect("output is UTF-8"))
}

/// Replaces column padding with ` | ` separators, so lines can be compared readably.
pub(crate) fn collapse_columns(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| {
            line.split('\t')
                .map(str::trim_end)
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
