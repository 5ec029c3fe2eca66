//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use sift_compile::{ColumnMap, SqlBackend, UnknownFieldPolicy};
use sift_config::{Config, SqlSettings, UnknownFields};

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (default if no config files were found or loaded).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used by commands that must work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Builds the SQL backend described by the `[sql]` settings.
    pub fn sql_backend(&self) -> SqlBackend {
        SqlBackend::new(column_map(&self.config.sql))
    }
}

/// Translates `[sql]` settings into column resolution for the SQL backend.
fn column_map(sql: &SqlSettings) -> ColumnMap {
    let policy = match sql.unknown_fields {
        UnknownFields::Passthrough => UnknownFieldPolicy::Passthrough,
        UnknownFields::NoMatch => UnknownFieldPolicy::NoMatch,
    };
    let columns = sql
        .columns
        .iter()
        .fold(ColumnMap::new(), |map, (field, column)| map.with_alias(field, column));
    sql.map_columns
        .iter()
        .fold(columns, |map, column| map.with_map_column(column))
        .with_implicit_columns(&sql.implicit_columns)
        .with_unknown_fields(policy)
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
