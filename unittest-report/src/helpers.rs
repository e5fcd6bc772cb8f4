// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! General support code for unittest-report.

use camino::Utf8Path;
use std::fmt;
use unicode_width::UnicodeWidthStr;

/// The width the first column of a report line is padded to.
pub(crate) const FIRST_COLUMN_WIDTH: usize = 70;

/// If the first column is wider than [`FIRST_COLUMN_WIDTH`], it is padded to the next multiple
/// of this step past it.
const COLUMN_WIDTH_STEP: usize = 30;

/// Indentation added to every line produced by word wrapping.
pub(crate) const WRAP_INDENT: &str = "  ";

/// Displays a duration in milliseconds with as many digits as it has, and no unit.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DisplayMillis(pub(crate) f64);

impl fmt::Display for DisplayMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64's Display already prints the shortest representation that round-trips, and no
        // trailing ".0" for integral values.
        write!(f, "{}", self.0)
    }
}

/// Displays a test file path, with the root directory abbreviated to `...`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DisplayReportPath<'a> {
    pub(crate) path: &'a Utf8Path,
    pub(crate) root_dir: Option<&'a Utf8Path>,
}

impl fmt::Display for DisplayReportPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abbreviated = self
            .root_dir
            .filter(|root| !root.as_str().is_empty())
            .and_then(|root| self.path.as_str().strip_prefix(root.as_str()));
        match abbreviated {
            Some(rest) => write!(f, "...{rest}"),
            None => write!(f, "{}", self.path),
        }
    }
}

/// Returns the width of `s` as displayed on a terminal, ignoring ANSI escapes.
///
/// Line breaks count as one column each.
pub(crate) fn visible_width(s: &str) -> usize {
    let stripped = strip_ansi_escapes::strip_str(s);
    let breaks = stripped.matches('\n').count();
    stripped.split('\n').map(UnicodeWidthStr::width).sum::<usize>() + breaks
}

/// Joins the columns of a report line with tabs.
///
/// The first column is padded with spaces to a width of [`FIRST_COLUMN_WIDTH`], or wider in
/// steps of [`COLUMN_WIDTH_STEP`] if it doesn't fit. Lines with a single column are padded too.
pub(crate) fn join_columns<S: AsRef<str>>(columns: &[S]) -> String {
    let Some((first, rest)) = columns.split_first() else {
        return String::new();
    };
    let first = first.as_ref();
    let width = visible_width(first);
    let mut target = FIRST_COLUMN_WIDTH;
    while target < width {
        target += COLUMN_WIDTH_STEP;
    }

    let mut line = String::with_capacity(target + rest.len() * 16);
    line.push_str(first);
    line.extend(std::iter::repeat_n(' ', target - width));
    for column in rest {
        line.push('\t');
        line.push_str(column.as_ref());
    }
    line
}

/// Wraps a single line of text at word boundaries, indenting every resulting line.
///
/// `width` is the number of columns available to the text itself, excluding the indentation.
/// Words longer than `width` are kept whole on a row of their own.
pub(crate) fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if line.trim().is_empty() {
        return vec![format!("{WRAP_INDENT}{line}")];
    }

    let options = textwrap::Options::new(width.max(1) + WRAP_INDENT.len())
        .initial_indent(WRAP_INDENT)
        .subsequent_indent(WRAP_INDENT)
        .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit)
        .break_words(false)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
        .word_splitter(textwrap::WordSplitter::NoHyphenation);
    textwrap::wrap(line, options)
        .into_iter()
        .map(|wrapped| wrapped.into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use owo_colors::OwoColorize;
    use test_case::test_case;

    #[test_case(300.0, "300"; "integral")]
    #[test_case(12.5, "12.5"; "fractional")]
    #[test_case(0.0, "0"; "zero")]
    fn display_millis(millis: f64, expected: &str) {
        assert_eq!(DisplayMillis(millis).to_string(), expected);
    }

    #[test]
    fn report_path_abbreviates_root() {
        let display = |path: &str, root: Option<&str>| {
            DisplayReportPath {
                path: Utf8Path::new(path),
                root_dir: root.map(Utf8Path::new),
            }
            .to_string()
        };

        assert_eq!(display("/repo/test/a.js", Some("/repo")), ".../test/a.js");
        assert_eq!(display("/other/a.js", Some("/repo")), "/other/a.js");
        assert_eq!(display("/repo/test/a.js", None), "/repo/test/a.js");
        assert_eq!(display("/repo/test/a.js", Some("")), "/repo/test/a.js");
    }

    #[test]
    fn join_columns_pads_first_column() {
        let line = join_columns(&["File: a.js", "OK", "300ms"]);
        assert_eq!(line, format!("File: a.js{}\tOK\t300ms", " ".repeat(60)));

        let long = "x".repeat(75);
        let line = join_columns(&[long.as_str(), "OK"]);
        assert_eq!(line, format!("{long}{}\tOK", " ".repeat(25)));

        assert_eq!(
            join_columns(&["only"]),
            format!("only{}", " ".repeat(66)),
            "a lone column is padded"
        );
        assert_eq!(
            join_columns(&["\n"]),
            format!("\n{}", " ".repeat(69)),
            "a line break counts as one column"
        );
        assert_eq!(join_columns::<&str>(&[]), "");
    }

    #[test]
    fn join_columns_ignores_escapes() {
        let styled = "Suite: S".dimmed().to_string();
        let line = join_columns(&[styled.as_str(), "OK"]);
        let (first, _) = line.split_once('\t').expect("line has two columns");
        assert_eq!(visible_width(first), 70);
        assert_eq!(
            strip_ansi_escapes::strip_str(&line),
            join_columns(&["Suite: S", "OK"])
        );
    }

    #[test]
    fn wrap_line_indents_and_breaks() {
        assert_eq!(
            wrap_line("alpha beta gamma", 10),
            ["  alpha beta", "  gamma"]
        );
        assert_eq!(wrap_line("short", 120), ["  short"]);
        assert_eq!(wrap_line("", 120), ["  "]);
    }

    #[test]
    fn wrap_line_keeps_long_words_whole() {
        let path = format!("/very/long/{}/file.js:1:1", "x".repeat(130));
        let line = format!("at {path} (in-suite-setup)");
        assert_eq!(
            wrap_line(&line, 120),
            [
                "  at".to_owned(),
                format!("  {path}"),
                "  (in-suite-setup)".to_owned(),
            ]
        );

        assert_eq!(
            wrap_line("see long-hyphenated-words-stay-intact", 12),
            ["  see", "  long-hyphenated-words-stay-intact"]
        );
    }
}
