// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the reporter.
//!
//! Configuration is layered: the embedded defaults in `default-config.toml` come first, then the
//! repository's config file if there is one.

use crate::{
    errors::{ConfigParseError, ConfigParseErrorKind},
    reporter::DEFAULT_FILE_OVERHEAD_MS,
};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, builder::DefaultState};
use serde::Deserialize;
use std::collections::BTreeSet;

/// Reporter configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ReportConfig {
    /// Reduced indentation for console entry titles.
    pub verbose: bool,

    /// The directory to write the plain-text report to.
    pub report_dir: Option<Utf8PathBuf>,

    /// The expected duration of the run, in seconds.
    pub estimated_time: Option<f64>,

    /// Test file paths under this directory are abbreviated.
    pub root_dir: Option<Utf8PathBuf>,

    /// The number of columns failure messages and log lines are wrapped to.
    pub wrap_width: usize,

    /// Fixed setup cost added to the expected duration of each file, in milliseconds.
    pub file_overhead_ms: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            report_dir: None,
            estimated_time: None,
            root_dir: None,
            wrap_width: Self::DEFAULT_WRAP_WIDTH,
            file_overhead_ms: DEFAULT_FILE_OVERHEAD_MS,
        }
    }
}

impl ReportConfig {
    /// The default location of the config within the workspace.
    pub const CONFIG_PATH: &'static str = ".config/unittest-report.toml";

    /// Contains the default config as a TOML file.
    ///
    /// Repository-specific configuration is layered on top of the default config.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../default-config.toml");

    /// The default wrap width.
    pub const DEFAULT_WRAP_WIDTH: usize = 120;

    /// Reads the config from `config_file`, or from [`Self::CONFIG_PATH`] within
    /// `workspace_root` if it exists.
    ///
    /// Relative paths in the config are resolved against `workspace_root`. Unknown keys are
    /// reported as warnings.
    pub fn from_sources(
        workspace_root: &Utf8Path,
        config_file: Option<&Utf8Path>,
    ) -> Result<Self, ConfigParseError> {
        let (config_file, source) = match config_file {
            Some(file) => (file.to_owned(), File::new(file.as_str(), FileFormat::Toml)),
            None => {
                let config_file = workspace_root.join(Self::CONFIG_PATH);
                let source = File::new(config_file.as_str(), FileFormat::Toml).required(false);
                (config_file, source)
            }
        };

        let builder = Self::make_default_config().add_source(source);
        let (mut config, unknown) = Self::build_and_deserialize_config(&builder)
            .map_err(|kind| ConfigParseError::new(&config_file, kind))?;

        for key in &unknown {
            tracing::warn!("ignoring unknown configuration key `{key}` in {config_file}");
        }

        config.resolve_paths(workspace_root);
        Ok(config)
    }

    fn make_default_config() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml))
    }

    /// This returns a tuple of (config, ignored paths).
    fn build_and_deserialize_config(
        builder: &ConfigBuilder<DefaultState>,
    ) -> Result<(Self, BTreeSet<String>), ConfigParseErrorKind> {
        let config = builder
            .build_cloned()
            .map_err(|error| ConfigParseErrorKind::BuildError(Box::new(error)))?;

        let mut ignored = BTreeSet::new();
        let mut cb = |path: serde_ignored::Path| {
            ignored.insert(path.to_string());
        };
        let ignored_de = serde_ignored::Deserializer::new(config, &mut cb);
        let config: Self = serde_path_to_error::deserialize(ignored_de).map_err(|error| {
            // serde_path_to_error already reports the key, so drop it from the config error.
            let path = error.path().clone();
            let error = match error.into_inner() {
                ConfigError::At { error, .. } => *error,
                other => other,
            };
            ConfigParseErrorKind::DeserializeError(Box::new(serde_path_to_error::Error::new(
                path, error,
            )))
        })?;

        Ok((config, ignored))
    }

    fn resolve_paths(&mut self, workspace_root: &Utf8Path) {
        for path in [&mut self.report_dir, &mut self.root_dir]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = workspace_root.join(&*path);
            }
        }
    }
}
