//! SQL condition backend.
//!
//! Compiles queries into a `WHERE` fragment for a ClickHouse-style log table. The
//! backend is type-agnostic: values are always string literals, except for range
//! bounds that parse as numbers.

use std::collections::HashMap;

use sift_query::Field;

use crate::{backend::Backend, error::CompileError};

/// Condition that matches nothing, used for fields that resolve to no column.
const NO_MATCH: &str = "(1 = 0)";

/// Condition that matches everything, used for empty search terms.
const MATCH_ALL: &str = "(1=1)";

/// Maps query fields to SQL column expressions.
pub trait ColumnResolver: Send + Sync {
    /// Expression searched by terms without a field, if any.
    fn implicit_column(&self) -> Option<String>;

    /// Expression for a named field, or None if the field matches no column.
    fn column(&self, field: &str) -> Option<String>;
}

/// What to do with a field that has no alias and is not under a map column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFieldPolicy {
    /// Use the field name as the column expression.
    #[default]
    Passthrough,
    /// Compile the condition to one that matches nothing.
    NoMatch,
}

/// Column resolution from static configuration.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    /// Columns searched by implicit terms, concatenated when there are several.
    implicit_columns: Vec<String>,
    /// Field name to column expression.
    aliases: HashMap<String, String>,
    /// Map-typed columns addressed as `Map.key`.
    map_columns: Vec<String>,
    /// Handling of fields nothing else resolves.
    unknown_fields: UnknownFieldPolicy,
}

impl ColumnMap {
    /// Creates an empty map: no implicit column, no aliases, passthrough fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the columns searched by implicit terms.
    pub fn with_implicit_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.implicit_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Maps a field name to a column expression.
    pub fn with_alias(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.aliases.insert(field.into(), column.into());
        self
    }

    /// Declares a map-typed column.
    pub fn with_map_column(mut self, column: impl Into<String>) -> Self {
        self.map_columns.push(column.into());
        self
    }

    /// Sets the unknown-field policy.
    pub fn with_unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }

    /// Resolves `Map.key` for a declared map column.
    fn map_access(&self, field: &str) -> Option<String> {
        self.map_columns.iter().find_map(|map| {
            let key = field.strip_prefix(map.as_str())?.strip_prefix('.')?;
            (!key.is_empty()).then(|| format!("`{map}`[{}]", string_literal(key)))
        })
    }
}

impl ColumnResolver for ColumnMap {
    fn implicit_column(&self) -> Option<String> {
        match self.implicit_columns.as_slice() {
            [] => None,
            [column] => Some(column.clone()),
            columns => Some(format!("concatWithSeparator(';',{})", columns.join(","))),
        }
    }

    fn column(&self, field: &str) -> Option<String> {
        if let Some(column) = self.aliases.get(field) {
            return Some(column.clone());
        }
        if let Some(access) = self.map_access(field) {
            return Some(access);
        }
        match self.unknown_fields {
            UnknownFieldPolicy::Passthrough => Some(field.to_string()),
            UnknownFieldPolicy::NoMatch => None,
        }
    }
}

/// Quotes a value as a SQL string literal.
fn string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Renders a range bound: finite numbers unquoted, anything else as a string.
fn bound_literal(value: &str) -> String {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => number.to_string(),
        _ => string_literal(value),
    }
}

/// True for the characters that split tokens for `hasToken`.
fn is_token_separator(ch: char) -> bool {
    ch.is_ascii_punctuation() || matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// Backend producing SQL conditions.
#[derive(Debug, Clone, Default)]
pub struct SqlBackend<R: ColumnResolver = ColumnMap> {
    /// Column lookup.
    columns: R,
}

impl<R: ColumnResolver> SqlBackend<R> {
    /// Creates a backend over the given column resolver.
    pub fn new(columns: R) -> Self {
        Self { columns }
    }

    /// Resolves a field to its column expression. `Ok(None)` means no column.
    fn resolve(&self, field: &Field, term: &str) -> Result<Option<String>, CompileError> {
        match field {
            Field::Implicit => self
                .columns
                .implicit_column()
                .map(Some)
                .ok_or_else(|| CompileError::MissingImplicitColumn {
                    term: term.to_string(),
                }),
            Field::Named(name) => Ok(self.columns.column(name)),
        }
    }

    /// Renders `(column op 'value')`, or the no-match condition.
    fn compare(&self, field: &Field, op: &str, value: &str) -> Result<String, CompileError> {
        Ok(match self.resolve(field, value)? {
            Some(column) => format!("({column} {op} {})", string_literal(value)),
            None => NO_MATCH.to_string(),
        })
    }

    /// Whole word search on the implicit column.
    fn whole_word(column: &str, term: &str, negated: bool) -> String {
        let has_token =
            |token: &str| format!("hasToken(lower({column}), lower({}))", string_literal(token));

        if !term.contains(is_token_separator) {
            let not = if negated { "NOT " } else { "" };
            return format!("({not}{})", has_token(term));
        }

        let mut parts: Vec<String> = term
            .split(is_token_separator)
            .filter(|token| !token.is_empty())
            .map(has_token)
            .collect();
        parts.push(format!(
            "(lower({column}) LIKE lower({}))",
            string_literal(&format!("%{term}%"))
        ));
        let joined = parts.join(" AND ");
        if negated {
            format!("(NOT ({joined}))")
        } else {
            format!("({joined})")
        }
    }
}

impl<R: ColumnResolver> Backend for SqlBackend<R> {
    fn eq(&self, field: &Field, value: &str, negated: bool) -> Result<String, CompileError> {
        self.compare(field, if negated { "!=" } else { "=" }, value)
    }

    fn is_not_null(&self, field: &Field, negated: bool) -> Result<String, CompileError> {
        Ok(match self.resolve(field, "*")? {
            Some(column) => {
                let op = if negated { "!=" } else { "=" };
                format!("notEmpty({column}) {op} 1")
            }
            None => NO_MATCH.to_string(),
        })
    }

    fn gte(&self, field: &Field, value: &str) -> Result<String, CompileError> {
        self.compare(field, ">=", value)
    }

    fn lte(&self, field: &Field, value: &str) -> Result<String, CompileError> {
        self.compare(field, "<=", value)
    }

    fn gt(&self, field: &Field, value: &str) -> Result<String, CompileError> {
        self.compare(field, ">", value)
    }

    fn lt(&self, field: &Field, value: &str) -> Result<String, CompileError> {
        self.compare(field, "<", value)
    }

    fn field_search(
        &self,
        field: &Field,
        term: &str,
        negated: bool,
        prefix_wildcard: bool,
        suffix_wildcard: bool,
    ) -> Result<String, CompileError> {
        let Some(column) = self.resolve(field, term)? else {
            return Ok(NO_MATCH.to_string());
        };
        if term.is_empty() {
            return Ok(MATCH_ALL.to_string());
        }

        let not = if negated { "NOT " } else { "" };
        if !field.is_implicit() {
            let pattern = string_literal(&format!("%{term}%"));
            return Ok(format!("({column} {not}ILIKE {pattern})"));
        }

        if prefix_wildcard || suffix_wildcard {
            let pattern = format!(
                "{}{term}{}",
                if prefix_wildcard { "%" } else { "" },
                if suffix_wildcard { "%" } else { "" }
            );
            return Ok(format!(
                "(lower({column}) {not}LIKE lower({}))",
                string_literal(&pattern)
            ));
        }

        Ok(Self::whole_word(&column, term, negated))
    }

    fn range(
        &self,
        field: &Field,
        min: &str,
        max: &str,
        inclusive: bool,
        negated: bool,
    ) -> Result<String, CompileError> {
        let Some(column) = self.resolve(field, min)? else {
            return Ok(NO_MATCH.to_string());
        };
        let (min, max) = (bound_literal(min), bound_literal(max));
        let not = if negated { "NOT " } else { "" };

        Ok(if inclusive {
            format!("({column} {not}BETWEEN {min} AND {max})")
        } else {
            format!("({not}({column} > {min} AND {column} < {max}))")
        })
    }
}
