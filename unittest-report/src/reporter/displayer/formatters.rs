// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Display helpers for statuses, durations and the summary table.

use crate::{
    helpers::{DisplayMillis, visible_width},
    reporter::{
        anomaly::{TimingAnomaly, TimingCheck},
        helpers::Styles,
        stats::{RollupStatus, RunStats, StatCounter},
    },
};
use owo_colors::{OwoColorize, Style};
use std::fmt;

pub(super) struct DisplayStatus<'a> {
    pub(super) status: RollupStatus,
    pub(super) styles: &'a Styles,
}

impl fmt::Display for DisplayStatus<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = match self.status {
            RollupStatus::Fail => self.styles.fail,
            RollupStatus::Ok => self.styles.pass,
            RollupStatus::Skipped => self.styles.skip,
            RollupStatus::NoTest => self.styles.no_test,
        };
        write!(f, "{}", self.status.as_str().style(style))
    }
}

/// Displays a duration, highlighted and annotated with its expected value if it was flagged.
pub(super) struct DisplayTime<'a> {
    pub(super) check: TimingCheck,
    pub(super) styles: &'a Styles,
}

impl fmt::Display for DisplayTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("{}ms", DisplayMillis(self.check.actual));
        let style = match self.check.anomaly {
            TimingAnomaly::Normal => return f.write_str(&text),
            TimingAnomaly::Slow => self.styles.slow,
            TimingAnomaly::VerySlow => self.styles.very_slow,
        };
        write!(
            f,
            "{} >> expected {}ms",
            text.style(style),
            DisplayMillis(self.check.expected.floor()),
        )
    }
}

const TABLE_HEADER: [&str; 5] = ["(index)", "Failed", "Skipped", "Passed", "Total"];

/// Renders the run totals as a box-drawn table, one line per element.
pub(super) fn summary_table(stats: &RunStats, styles: &Styles) -> Vec<String> {
    let mut rows: Vec<Vec<String>> = vec![TABLE_HEADER.map(str::to_owned).to_vec()];
    for (name, counter) in [
        ("Files", &stats.files),
        ("Suites", &stats.suites),
        ("Tests", &stats.tests),
    ] {
        rows.push(table_row(name, counter, styles));
    }

    let mut widths = [0usize; TABLE_HEADER.len()];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(visible_width(cell));
        }
    }

    let border = |left: char, mid: char, right: char| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}", segments.join(&mid.to_string()))
    };
    let row_line = |row: &[String]| {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| {
                let padding = width - visible_width(cell);
                format!(" {cell}{} ", " ".repeat(padding))
            })
            .collect();
        format!("│{}│", cells.join("│"))
    };

    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push(border('┌', '┬', '┐'));
    lines.push(row_line(rows[0].as_slice()));
    lines.push(border('├', '┼', '┤'));
    lines.extend(rows[1..].iter().map(|row| row_line(row.as_slice())));
    lines.push(border('└', '┴', '┘'));
    lines
}

fn table_row(name: &str, counter: &StatCounter, styles: &Styles) -> Vec<String> {
    // Zero counts are left plain so that nonzero failures and skips stand out.
    let highlight_nonzero = |count: usize, style: Style| {
        if count == 0 {
            "0".to_owned()
        } else {
            count.style(style).to_string()
        }
    };
    vec![
        name.to_owned(),
        highlight_nonzero(counter.failing, styles.fail),
        highlight_nonzero(counter.pending, styles.skip),
        counter.passing.style(styles.pass).to_string(),
        counter.total.to_string(),
    ]
}
