//! Configuration merging.
//!
//! Folds parsed `.sift.toml` files into a single `Config`.

use std::path::{Path, PathBuf};

use crate::{
    Config, SqlSettings,
    parse::{RawConfig, RawSqlSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges configuration files into a single `Config`.
///
/// Configs are given highest precedence first (closest to the working directory) and
/// the global config last.
///
/// Merge rules:
/// - Scalars and lists: the first file that defines a value wins outright
/// - Column aliases: merged per field, first definition of each field wins
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut sql = SqlSettings::default();

    // Lowest precedence first so closer files overwrite.
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.sql {
            apply_raw_sql(&mut sql, raw);
        }
    }

    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(Path::to_path_buf);

    Config { sql, config_root }
}

/// Applies a raw `[sql]` section, overwriting any values it defines.
fn apply_raw_sql(result: &mut SqlSettings, raw: &RawSqlSettings) {
    if let Some(ref v) = raw.implicit_columns {
        result.implicit_columns.clone_from(v);
    }
    if let Some(v) = raw.unknown_fields {
        result.unknown_fields = v;
    }
    if let Some(ref v) = raw.map_columns {
        result.map_columns.clone_from(v);
    }
    if let Some(ref columns) = raw.columns {
        for (field, column) in columns {
            result.columns.insert(field.clone(), column.clone());
        }
    }
}
