//! Compilation errors.

use sift_query::QueryError;
use thiserror::Error;

/// Error raised while compiling a query tree with a backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The query searches the implicit field but the backend has no default column.
    #[error("no implicit column configured to search for '{term}'")]
    MissingImplicitColumn {
        /// The term that needed the implicit column.
        term: String,
    },

    /// A backend rejected an operation.
    #[error("{0}")]
    Backend(String),
}

impl From<CompileError> for QueryError {
    fn from(err: CompileError) -> Self {
        Self::compile(err.to_string())
    }
}
