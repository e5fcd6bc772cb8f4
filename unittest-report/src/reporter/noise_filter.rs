// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cleans captured console output before it is attached to a file's results.
//!
//! The harness formats each console entry as a title line naming the console method, followed by
//! the message indented underneath. For compact nested display we drop the title lines, strip the
//! harness indentation, and move assertion "expectation" lines below the line they describe.

use unittest_report_metadata::{ConsoleEntry, FileRunSummary};

/// Lines containing this carry call-site attribution rather than logged content.
pub const ATTRIBUTION_MARKER: &str = "console.";

/// Lines containing this are assertion expectations.
pub const EXPECTATION_MARKER: &str = "\u{2502} Expecting";

/// Width of the indentation the harness formatter puts in front of every line.
const INDENT_WIDTH: usize = 4;

/// Expands console entries into display lines, the way the harness console formatter does.
///
/// Origins are blanked out: logged messages are already stack traces or error details, and the
/// location of the logging call itself is noise.
pub fn format_console(entries: &[ConsoleEntry], verbose: bool) -> Vec<String> {
    let title_indent = if verbose { "  " } else { "    " };
    let mut lines = Vec::new();
    for entry in entries {
        lines.push(format!("{title_indent}console.{}", entry.entry_type));
        lines.extend(
            entry
                .message
                .split('\n')
                .map(|line| format!("{title_indent}  {line}")),
        );
        lines.push(String::new());
    }
    lines
}

/// Drops attribution and empty lines, strips indentation, and moves each run of expectation
/// lines below the next content line.
///
/// Expectation lines with no content line after them are dropped.
pub fn clean_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cleaned = Vec::new();
    let mut expectations = Vec::new();
    for line in lines {
        let line = line.as_ref();
        if line.is_empty() || line.contains(ATTRIBUTION_MARKER) {
            continue;
        }

        if line.contains(EXPECTATION_MARKER) {
            expectations.push(strip_indent(line).to_owned());
            continue;
        }

        cleaned.push(strip_indent(line).to_owned());
        cleaned.append(&mut expectations);
    }
    cleaned
}

/// Cleans the console output of a file with failing tests.
///
/// Returns `None`, leaving the file untouched, if no test failed or nothing was captured.
/// Otherwise the file's aggregated failure message is cleared, since the cleaned lines carry
/// the same details at a finer granularity.
pub fn filter_file_output(file: &mut FileRunSummary, verbose: bool) -> Option<Vec<String>> {
    if file.num_failing() == 0 {
        return None;
    }
    let entries = file.console.as_deref().filter(|entries| !entries.is_empty())?;

    let lines = clean_lines(format_console(entries, verbose));
    file.failure_message = None;
    Some(lines)
}

fn strip_indent(line: &str) -> &str {
    line.char_indices()
        .nth(INDENT_WIDTH)
        .map_or("", |(idx, _)| &line[idx..])
}
