//! Configuration system for sift.
//!
//! sift reads TOML files named `.sift.toml`. Configuration is resolved by walking up the
//! directory tree from the working directory, collecting any `.sift.toml` files found,
//! then loading `~/.sift.toml` as the global config with lowest precedence.
//!
//! The only section today is `[sql]`, which tells the SQL backend which columns to
//! search:
//!
//! ```toml
//! [sql]
//! implicit_columns = ["Body"]
//! unknown_fields = "passthrough"
//! map_columns = ["LogAttributes"]
//!
//! [sql.columns]
//! service = "ServiceName"
//! ```

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{RawConfig, RawSqlSettings, parse_config_file, parse_config_str};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// SQL condition settings.
    pub sql: SqlSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.sift.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from specific files, highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings in `.sift.toml` format.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            sql: self.sql.clone(),
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// How the SQL backend treats a field with no column alias.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownFields {
    /// Use the field name itself as the column expression.
    ///
    /// Map columns are only used for fields written as `Map.key`.
    #[default]
    Passthrough,
    /// Compile the term to a condition that matches nothing.
    NoMatch,
}

/// Settings for SQL condition output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SqlSettings {
    /// Columns searched by implicit-field terms.
    pub implicit_columns: Vec<String>,
    /// Handling of fields without an alias.
    pub unknown_fields: UnknownFields,
    /// Map-typed columns for unknown fields.
    pub map_columns: Vec<String>,
    /// Field name to column expression, sorted for stable output.
    pub columns: BTreeMap<String, String>,
}

impl Default for SqlSettings {
    fn default() -> Self {
        Self {
            implicit_columns: vec![String::from("Body")],
            unknown_fields: UnknownFields::default(),
            map_columns: Vec::new(),
            columns: BTreeMap::new(),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// SQL condition settings.
    sql: SqlSettings,
}
