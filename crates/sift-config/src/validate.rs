//! Configuration validation.
//!
//! Reports settings that load fine but will produce surprising SQL.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No implicit column is configured, so bare terms cannot compile to SQL.
    NoImplicitColumn,
    /// An implicit column entry is blank.
    EmptyImplicitColumn,
    /// A column alias maps a field to a blank expression.
    EmptyColumnExpression {
        /// Field with the blank alias.
        field: String,
    },
    /// A column alias hides a map column or one of its keys.
    AliasShadowsMapColumn {
        /// Aliased field name.
        field: String,
        /// Map column it hides.
        map: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoImplicitColumn => {
                write!(f, "sql.implicit_columns is empty; terms without a field will fail")
            }
            Self::EmptyImplicitColumn => {
                write!(f, "sql.implicit_columns contains a blank column")
            }
            Self::EmptyColumnExpression { field } => {
                write!(f, "column alias for field '{field}' is blank")
            }
            Self::AliasShadowsMapColumn { field, map } => {
                write!(f, "column alias '{field}' shadows map column '{map}'")
            }
        }
    }
}

impl ConfigWarning {
    /// Suggests how to resolve the warning.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::NoImplicitColumn => "set implicit_columns under [sql], e.g. \"Body\"",
            Self::EmptyImplicitColumn => "remove the empty entry from sql.implicit_columns",
            Self::EmptyColumnExpression { .. } => {
                "give the alias a column name or remove it from [sql.columns]"
            }
            Self::AliasShadowsMapColumn { .. } => {
                "rename the alias so the map key stays reachable"
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let sql = &config.sql;
    let mut warnings = Vec::new();

    if sql.implicit_columns.is_empty() {
        warnings.push(ConfigWarning::NoImplicitColumn);
    } else if sql.implicit_columns.iter().any(|c| c.trim().is_empty()) {
        warnings.push(ConfigWarning::EmptyImplicitColumn);
    }

    for (field, column) in &sql.columns {
        if column.trim().is_empty() {
            warnings.push(ConfigWarning::EmptyColumnExpression {
                field: field.clone(),
            });
        }
        if let Some(map) = shadowed_map_column(field, &sql.map_columns) {
            warnings.push(ConfigWarning::AliasShadowsMapColumn {
                field: field.clone(),
                map: map.to_string(),
            });
        }
    }

    warnings
}

/// Returns the map column that `field` names directly or as `Map.key`.
fn shadowed_map_column<'a>(field: &str, map_columns: &'a [String]) -> Option<&'a str> {
    map_columns.iter().map(String::as_str).find(|&map| {
        field
            .strip_prefix(map)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_clean() {
        assert!(validate_config(&Config::default()).is_empty());
    }

    #[test]
    fn missing_implicit_column() {
        let mut config = Config::default();
        config.sql.implicit_columns.clear();
        assert_eq!(validate_config(&config), vec![ConfigWarning::NoImplicitColumn]);
    }

    #[test]
    fn blank_entries() {
        let mut config = Config::default();
        config.sql.implicit_columns.push("  ".into());
        config.sql.columns.insert("level".into(), String::new());
        assert_eq!(
            validate_config(&config),
            vec![
                ConfigWarning::EmptyImplicitColumn,
                ConfigWarning::EmptyColumnExpression {
                    field: "level".into()
                },
            ]
        );
    }

    #[test]
    fn alias_over_map_column() {
        let mut config = Config::default();
        config.sql.map_columns.push("LogAttributes".into());
        let columns = &mut config.sql.columns;
        columns.insert("LogAttributes".into(), "Attrs".into());
        columns.insert("LogAttributes.user".into(), "UserName".into());
        columns.insert("LogAttributesX".into(), "Other".into());

        let warnings = validate_config(&config);
        assert_eq!(
            warnings,
            vec![
                ConfigWarning::AliasShadowsMapColumn {
                    field: "LogAttributes".into(),
                    map: "LogAttributes".into(),
                },
                ConfigWarning::AliasShadowsMapColumn {
                    field: "LogAttributes.user".into(),
                    map: "LogAttributes".into(),
                },
            ]
        );
        assert_eq!(
            warnings[1].to_string(),
            "column alias 'LogAttributes.user' shadows map column 'LogAttributes'"
        );
    }
}
