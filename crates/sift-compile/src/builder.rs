//! Search condition builder.
//!
//! Combines a compiled search query with extra conditions into one `WHERE` clause.

use sift_query::QueryError;

use crate::{backend::Backend, compile::compile_str};

/// Builds a condition string from a search query plus extra conditions.
///
/// Every part is wrapped in parentheses and the parts are joined with ` AND `.
pub struct SearchConditionBuilder<'a, B: Backend + ?Sized> {
    /// Raw search query.
    query: &'a str,
    /// Backend compiling the search query.
    backend: &'a B,
    /// Extra conditions, already parenthesized.
    conditions: Vec<String>,
}

impl<'a, B: Backend + ?Sized> SearchConditionBuilder<'a, B> {
    /// Creates a builder for a search query.
    pub fn new(query: &'a str, backend: &'a B) -> Self {
        Self {
            query,
            backend,
            conditions: Vec::new(),
        }
    }

    /// Adds a condition. Blank conditions are ignored.
    pub fn and(mut self, condition: impl AsRef<str>) -> Self {
        self.push(condition.as_ref());
        self
    }

    /// Appends a parenthesized condition unless it is blank.
    fn push(&mut self, condition: &str) {
        if !condition.trim().is_empty() {
            self.conditions.push(format!("({condition})"));
        }
    }

    /// Compiles the search query and joins it with the extra conditions.
    ///
    /// The search comes last. An empty search adds nothing.
    pub fn build(mut self) -> Result<String, QueryError> {
        let search = compile_str(self.query, self.backend)?;
        self.push(&search);
        Ok(self.conditions.join(" AND "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{ColumnMap, SqlBackend};

    fn backend() -> SqlBackend {
        SqlBackend::new(ColumnMap::new().with_implicit_columns(["Body"]))
    }

    #[test]
    fn search_only() {
        let backend = backend();
        let sql = SearchConditionBuilder::new("foo:bar", &backend).build().unwrap();
        assert_eq!(sql, "((foo ILIKE '%bar%'))");
    }

    #[test]
    fn extra_conditions_come_first() {
        let backend = backend();
        let sql = SearchConditionBuilder::new("bar", &backend)
            .and("Timestamp > now() - INTERVAL 1 HOUR")
            .and("  ")
            .build()
            .unwrap();
        assert_eq!(
            sql,
            "(Timestamp > now() - INTERVAL 1 HOUR) AND ((hasToken(lower(Body), lower('bar'))))"
        );
    }

    #[test]
    fn empty_search_adds_nothing() {
        let backend = backend();
        assert_eq!(SearchConditionBuilder::new("", &backend).build().unwrap(), "");
        let sql = SearchConditionBuilder::new("   ", &backend)
            .and("x = 1")
            .build()
            .unwrap();
        assert_eq!(sql, "(x = 1)");
    }

    #[test]
    fn parse_errors_propagate() {
        let backend = backend();
        let err = SearchConditionBuilder::new("foo:\"bar", &backend)
            .build()
            .unwrap_err();
        assert!(err.message().contains("unclosed quote"));
    }
}
