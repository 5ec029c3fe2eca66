//! Backend-agnostic compilation of sift queries.
//!
//! A parsed query tree is walked depth-first. Each leaf is mapped by the term
//! interpreter to one [`Backend`] operation, and the results are joined with the
//! boolean keywords and parentheses of the source query.
//!
//! Two backends ship with the crate:
//!
//! - [`EnglishBackend`] - readable explanations for search-box hints
//! - [`SqlBackend`] - `WHERE` fragments for a ClickHouse-style log table
//!
//! # Example
//!
//! ```
//! use sift_compile::{ColumnMap, SearchConditionBuilder, SqlBackend, compile_to_explanation};
//!
//! assert_eq!(compile_to_explanation("*err*"), "event contains err");
//! assert_eq!(compile_to_explanation("foo:\"bar"), "Message containing foo:\"bar");
//!
//! let backend = SqlBackend::new(ColumnMap::new().with_implicit_columns(["Body"]));
//! let sql = SearchConditionBuilder::new("service:api", &backend).build().unwrap();
//! assert_eq!(sql, "((service ILIKE '%api%'))");
//! ```

#![warn(missing_docs)]

mod backend;
mod builder;
mod compile;
mod english;
mod error;
mod explain;
mod interpret;
mod sql;

pub use backend::Backend;
pub use builder::SearchConditionBuilder;
pub use compile::{Compiler, compile_str};
pub use english::EnglishBackend;
pub use error::CompileError;
pub use explain::{compile_to_explanation, explain, fallback_explanation};
pub use interpret::{FieldType, FieldTypeResolver, interpret_range, interpret_term};
pub use sql::{ColumnMap, ColumnResolver, SqlBackend, UnknownFieldPolicy};
