//! Run settings, layered from lowest to highest precedence:
//! built-in defaults, `talkgraph.toml`, environment, command-line flags.
//!
//! Each layer is a [`Layer`] of optional values; [`Settings::resolve`]
//! fills whatever is still unset from the defaults.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::archive::MatchScope;
use crate::directory::OrgColumns;

pub const DEFAULT_CONFIG_FILE: &str = "talkgraph.toml";
pub const DEFAULT_MINIMUM_WORD_COUNT: i64 = 100;

/// One configuration source. `None` means "not set here".
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layer {
    pub data_dir: Option<PathBuf>,
    pub users: Option<PathBuf>,
    pub org_chart: Option<PathBuf>,
    pub ignore: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub minimum_word_count: Option<i64>,
    pub obfuscate_names: Option<bool>,
    pub exclude_channels: Option<Vec<String>>,
    pub match_scope: Option<MatchScope>,
    pub since: Option<String>,
    pub department_column: Option<usize>,
    pub email_column: Option<usize>,
}

impl Layer {
    pub fn parse(content: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
        Self::parse(&content).map_err(|e| format!("{}: {e}", path.display()).into())
    }

    /// Read `OBFUSCATE_NAMES` and `MINIMUM_WORD_COUNT` through `var`.
    ///
    /// `OBFUSCATE_NAMES` is read only when exactly `true` or `false`; any
    /// other value is ignored with a warning. A `MINIMUM_WORD_COUNT` that is
    /// not an integer is an error.
    pub fn from_env(var: impl Fn(&str) -> Option<String>) -> Result<Self, Box<dyn Error>> {
        let mut layer = Self::default();

        if let Some(value) = var("OBFUSCATE_NAMES") {
            layer.obfuscate_names = match value.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                "" => None,
                other => {
                    tracing::warn!("ignoring OBFUSCATE_NAMES={other:?} (expected true or false)");
                    None
                }
            };
        }

        if let Some(value) = var("MINIMUM_WORD_COUNT")
            && !value.trim().is_empty()
        {
            let n = value
                .trim()
                .parse()
                .map_err(|_| format!("invalid MINIMUM_WORD_COUNT: {value:?}"))?;
            layer.minimum_word_count = Some(n);
        }

        Ok(layer)
    }

    /// Values set in `upper` win over values set in `self`.
    pub fn merge(self, upper: Layer) -> Layer {
        Layer {
            data_dir: upper.data_dir.or(self.data_dir),
            users: upper.users.or(self.users),
            org_chart: upper.org_chart.or(self.org_chart),
            ignore: upper.ignore.or(self.ignore),
            output_dir: upper.output_dir.or(self.output_dir),
            minimum_word_count: upper.minimum_word_count.or(self.minimum_word_count),
            obfuscate_names: upper.obfuscate_names.or(self.obfuscate_names),
            exclude_channels: upper.exclude_channels.or(self.exclude_channels),
            match_scope: upper.match_scope.or(self.match_scope),
            since: upper.since.or(self.since),
            department_column: upper.department_column.or(self.department_column),
            email_column: upper.email_column.or(self.email_column),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub users: PathBuf,
    pub org_chart: PathBuf,
    pub ignore: PathBuf,
    pub output_dir: PathBuf,
    /// Edges are kept when a one-directional weight is strictly greater.
    /// Negative values keep every pair.
    pub minimum_word_count: i64,
    pub obfuscate_names: bool,
    pub exclude_channels: Vec<String>,
    pub match_scope: MatchScope,
    pub since: Option<String>,
    pub org_columns: OrgColumns,
}

impl Settings {
    /// Fill unset values with defaults. Input files default to the data
    /// directory: `users.json`, `org_chart.csv` and `ignore.txt`.
    pub fn resolve(layer: Layer) -> Self {
        let data_dir = layer.data_dir.unwrap_or_else(|| PathBuf::from("data"));
        let defaults = OrgColumns::default();
        Self {
            users: layer.users.unwrap_or_else(|| data_dir.join("users.json")),
            org_chart: layer
                .org_chart
                .unwrap_or_else(|| data_dir.join("org_chart.csv")),
            ignore: layer.ignore.unwrap_or_else(|| data_dir.join("ignore.txt")),
            output_dir: layer.output_dir.unwrap_or_else(|| PathBuf::from("output")),
            minimum_word_count: layer
                .minimum_word_count
                .unwrap_or(DEFAULT_MINIMUM_WORD_COUNT),
            obfuscate_names: layer.obfuscate_names.unwrap_or(false),
            exclude_channels: layer.exclude_channels.unwrap_or_default(),
            match_scope: layer.match_scope.unwrap_or_default(),
            since: layer.since,
            org_columns: OrgColumns {
                department: layer.department_column.unwrap_or(defaults.department),
                email: layer.email_column.unwrap_or(defaults.email),
            },
            data_dir,
        }
    }

    /// Load settings for a command: `config` (or `talkgraph.toml` in the
    /// working directory, if present), then the process environment, then
    /// `overrides` from the command line.
    pub fn load(config: Option<&Path>, overrides: Layer) -> Result<Self, Box<dyn Error>> {
        let file = match config {
            Some(path) => Layer::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Layer::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Layer::default(),
        };
        let env = Layer::from_env(|key| std::env::var(key).ok())?;
        Ok(Self::resolve(file.merge(env).merge(overrides)))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
