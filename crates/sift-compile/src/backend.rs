//! The backend contract.
//!
//! A backend turns each semantic leaf operation into a fragment of its target
//! representation. The tree walker combines the fragments with boolean keywords and
//! parentheses, so a backend never sees the shape of the tree.

use sift_query::{BinaryOperator, Field};

use crate::error::CompileError;

/// One method per semantic operation the term interpreter can dispatch to.
///
/// Values are raw strings. Backends decide how to quote or coerce them.
pub trait Backend: Send + Sync {
    /// Exact match of a quoted value against a named field.
    fn eq(&self, field: &Field, value: &str, negated: bool) -> Result<String, CompileError>;

    /// Existence test (`field:*`). Negated, it tests for absence.
    fn is_not_null(&self, field: &Field, negated: bool) -> Result<String, CompileError>;

    /// `field >= value`.
    fn gte(&self, field: &Field, value: &str) -> Result<String, CompileError>;

    /// `field <= value`.
    fn lte(&self, field: &Field, value: &str) -> Result<String, CompileError>;

    /// `field > value`.
    fn gt(&self, field: &Field, value: &str) -> Result<String, CompileError>;

    /// `field < value`.
    fn lt(&self, field: &Field, value: &str) -> Result<String, CompileError>;

    /// Substring or whole word search.
    ///
    /// `term` has its wildcards stripped. `prefix_wildcard` is set when the value
    /// began with `*`, `suffix_wildcard` when it ended with one.
    fn field_search(
        &self,
        field: &Field,
        term: &str,
        negated: bool,
        prefix_wildcard: bool,
        suffix_wildcard: bool,
    ) -> Result<String, CompileError>;

    /// Range test. Bounds are the raw tokens from the query.
    fn range(
        &self,
        field: &Field,
        min: &str,
        max: &str,
        inclusive: bool,
        negated: bool,
    ) -> Result<String, CompileError>;

    /// The keyword joining two compiled operands.
    fn operator(&self, operator: BinaryOperator) -> &'static str {
        operator.keyword()
    }
}
