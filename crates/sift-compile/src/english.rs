//! English explanation backend.
//!
//! Renders queries as readable clauses for search-box hints, e.g.
//! `level:"error" -service:*checkout*` becomes
//! `'level' is error AND 'service' does not contain checkout`.

use sift_query::Field;

use crate::{backend::Backend, error::CompileError};

/// Backend that explains a query in English.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishBackend;

/// How a field reads in a clause: `event` for the implicit field, quoted otherwise.
fn subject(field: &Field) -> String {
    match field {
        Field::Implicit => "event".to_string(),
        Field::Named(name) => format!("'{name}'"),
    }
}

impl Backend for EnglishBackend {
    fn eq(&self, field: &Field, value: &str, negated: bool) -> Result<String, CompileError> {
        let verb = if negated { "is not" } else { "is" };
        Ok(format!("{} {verb} {value}", subject(field)))
    }

    fn is_not_null(&self, field: &Field, negated: bool) -> Result<String, CompileError> {
        let state = if negated { "is null" } else { "is not null" };
        Ok(format!("{} {state}", subject(field)))
    }

    fn gte(&self, field: &Field, value: &str) -> Result<String, CompileError> {
        Ok(format!(
            "{} is greater than or equal to {value}",
            subject(field)
        ))
    }

    fn lte(&self, field: &Field, value: &str) -> Result<String, CompileError> {
        Ok(format!("{} is less than or equal to {value}", subject(field)))
    }

    fn gt(&self, field: &Field, value: &str) -> Result<String, CompileError> {
        Ok(format!("{} is greater than {value}", subject(field)))
    }

    fn lt(&self, field: &Field, value: &str) -> Result<String, CompileError> {
        Ok(format!("{} is less than {value}", subject(field)))
    }

    fn field_search(
        &self,
        field: &Field,
        term: &str,
        negated: bool,
        prefix_wildcard: bool,
        suffix_wildcard: bool,
    ) -> Result<String, CompileError> {
        let verb = match (field.is_implicit(), prefix_wildcard, suffix_wildcard, negated) {
            (false, _, _, false) | (true, true, true, false) => "contains",
            (false, _, _, true) | (true, true, true, true) => "does not contain",
            (true, true, false, false) => "ends with",
            (true, true, false, true) => "does not end with",
            (true, false, true, false) => "starts with",
            (true, false, true, true) => "does not start with",
            (true, false, false, false) => "has whole word",
            (true, false, false, true) => "does not have whole word",
        };
        Ok(format!("{} {verb} {term}", subject(field)))
    }

    fn range(
        &self,
        field: &Field,
        min: &str,
        max: &str,
        inclusive: bool,
        negated: bool,
    ) -> Result<String, CompileError> {
        let name = field.name().unwrap_or("event");
        let verb = if negated { "is not" } else { "is" };
        let bounds = if inclusive { "" } else { " (exclusive)" };
        Ok(format!("{name} {verb} between {min} and {max}{bounds}"))
    }
}
