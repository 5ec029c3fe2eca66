//! English explanations that never fail.

use sift_query::QueryError;
use tracing::warn;

use crate::{compile::compile_str, english::EnglishBackend};

/// Explains a raw query in English.
pub fn explain(query: &str) -> Result<String, QueryError> {
    compile_str(query, &EnglishBackend)
}

/// Explains a raw query in English, falling back to `Message containing <query>`
/// when the query does not parse.
pub fn compile_to_explanation(query: &str) -> String {
    match explain(query) {
        Ok(explanation) => explanation,
        Err(err) => {
            warn!(query, error = err.message(), "query explanation failed, using fallback");
            fallback_explanation(query)
        }
    }
}

/// The explanation used for a query that cannot be explained.
pub fn fallback_explanation(query: &str) -> String {
    format!("Message containing {query}")
}
