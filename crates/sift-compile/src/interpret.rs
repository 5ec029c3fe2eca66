//! Term interpreter.
//!
//! Decides which backend operation a leaf maps to. Rules are tried in order and
//! the first match wins:
//!
//! 1. ranges call `range`
//! 2. quoted values on a named field call `eq`
//! 3. a bare `*` calls `is_not_null`
//! 4. bare `>=`, `<=`, `>`, `<` prefixes call the comparison, inverted when negated
//! 5. everything else calls `field_search`, with one leading and one trailing `*`
//!    stripped from bare values
//!
//! Dispatch never depends on field types.

use std::collections::HashMap;

use sift_query::Field;
use tracing::trace;

use crate::{backend::Backend, error::CompileError};

/// Declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Free text.
    String,
    /// Numeric values.
    Number,
    /// `true`/`false` values.
    Bool,
}

/// Looks up declared field types.
///
/// Type information is surfaced as a trace diagnostic only. It does not change which
/// backend operation a term compiles to.
pub trait FieldTypeResolver: Send + Sync {
    /// Returns the declared type of a named field, if known.
    fn field_type(&self, field: &str) -> Option<FieldType>;
}

impl FieldTypeResolver for HashMap<String, FieldType> {
    fn field_type(&self, field: &str) -> Option<FieldType> {
        self.get(field).copied()
    }
}

/// Compiles a `Term` leaf.
pub fn interpret_term<B: Backend + ?Sized>(
    backend: &B,
    field: &Field,
    text: &str,
    quoted: bool,
    negated: bool,
) -> Result<String, CompileError> {
    if quoted && !field.is_implicit() {
        return backend.eq(field, text, negated);
    }

    if !quoted {
        if text == "*" {
            return backend.is_not_null(field, negated);
        }
        if let Some(value) = text.strip_prefix(">=") {
            return if negated {
                backend.lt(field, value)
            } else {
                backend.gte(field, value)
            };
        }
        if let Some(value) = text.strip_prefix("<=") {
            return if negated {
                backend.gt(field, value)
            } else {
                backend.lte(field, value)
            };
        }
        if let Some(value) = text.strip_prefix('>') {
            return if negated {
                backend.lte(field, value)
            } else {
                backend.gt(field, value)
            };
        }
        if let Some(value) = text.strip_prefix('<') {
            return if negated {
                backend.gte(field, value)
            } else {
                backend.lt(field, value)
            };
        }
    }

    let mut term = text;
    let mut prefix_wildcard = false;
    let mut suffix_wildcard = false;
    if !quoted {
        if let Some(rest) = term.strip_prefix('*') {
            prefix_wildcard = true;
            term = rest;
        }
        if let Some(rest) = term.strip_suffix('*') {
            suffix_wildcard = true;
            term = rest;
        }
    }

    backend.field_search(field, term, negated, prefix_wildcard, suffix_wildcard)
}

/// Compiles a `RangedTerm` leaf.
pub fn interpret_range<B: Backend + ?Sized>(
    backend: &B,
    field: &Field,
    min: &str,
    max: &str,
    inclusive: bool,
    negated: bool,
) -> Result<String, CompileError> {
    backend.range(field, min, max, inclusive, negated)
}

/// Emits a trace diagnostic with the declared type of a named field.
pub(crate) fn trace_field_type(resolver: &dyn FieldTypeResolver, field: &Field) {
    if let Some(name) = field.name()
        && let Some(field_type) = resolver.field_type(name)
    {
        trace!(field = name, ?field_type, "field type known, dispatch stays type-agnostic");
    }
}
