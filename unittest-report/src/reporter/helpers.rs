// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use owo_colors::Style;

#[derive(Debug, Default, Clone)]
pub(super) struct Styles {
    pub(super) pass: Style,
    pub(super) fail: Style,
    pub(super) skip: Style,
    pub(super) no_test: Style,
    pub(super) unit_name: Style,
    pub(super) bold: Style,
    pub(super) slow: Style,
    pub(super) very_slow: Style,
    pub(super) log_output: Style,
    pub(super) failure_output: Style,
}

impl Styles {
    pub(super) fn colorize(&mut self) {
        self.pass = Style::new().green();
        self.fail = Style::new().red();
        self.skip = Style::new().yellow();
        self.no_test = Style::new().dimmed();
        self.unit_name = Style::new().dimmed();
        self.bold = Style::new().bold();
        self.slow = Style::new().yellow().bold();
        self.very_slow = Style::new().red().bold();
        self.log_output = Style::new().dimmed();
        self.failure_output = Style::new().red();
    }
}
