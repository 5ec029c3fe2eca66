//! Tree walker.
//!
//! Compiles a query tree with a backend, depth-first and left to right.

use sift_query::{Node, QueryError, parse};
use tracing::debug;

use crate::{
    backend::Backend,
    error::CompileError,
    interpret::{FieldTypeResolver, interpret_range, interpret_term, trace_field_type},
};

/// Compiles query trees into a backend's representation.
pub struct Compiler<'a, B: Backend + ?Sized> {
    /// Backend producing leaf fragments.
    backend: &'a B,
    /// Optional field type lookup, used for diagnostics only.
    field_types: Option<&'a dyn FieldTypeResolver>,
}

impl<'a, B: Backend + ?Sized> Compiler<'a, B> {
    /// Creates a compiler for the given backend.
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            field_types: None,
        }
    }

    /// Attaches a field type resolver.
    pub fn with_field_types(mut self, resolver: &'a dyn FieldTypeResolver) -> Self {
        self.field_types = Some(resolver);
        self
    }

    /// Compiles a parsed query. An absent tree compiles to the empty string.
    pub fn compile_query(&self, node: Option<&Node>) -> Result<String, CompileError> {
        let Some(node) = node else {
            return Ok(String::new());
        };
        let output = self.compile(node)?;
        debug!(output = %output, "compiled query");
        Ok(output)
    }

    /// Compiles a query tree.
    pub fn compile(&self, node: &Node) -> Result<String, CompileError> {
        match node {
            Node::Term {
                field,
                text,
                quoted,
                negated,
            } => {
                if let Some(resolver) = self.field_types {
                    trace_field_type(resolver, field);
                }
                interpret_term(self.backend, field, text, *quoted, *negated)
            }
            Node::RangedTerm {
                field,
                min,
                max,
                inclusive,
                negated,
            } => {
                if let Some(resolver) = self.field_types {
                    trace_field_type(resolver, field);
                }
                interpret_range(self.backend, field, min, max, *inclusive, *negated)
            }
            Node::Binary {
                left,
                right,
                operator,
                parenthesized,
            } => {
                let left = self.compile(left)?;
                let right = self.compile(right)?;
                let joined = format!("{left} {} {right}", self.backend.operator(*operator));
                Ok(wrap(joined, *parenthesized))
            }
            Node::LeftOnly {
                left,
                prefix,
                parenthesized,
            } => {
                let inner = self.compile(left)?;
                let body = match prefix {
                    Some(keyword) => format!("{keyword} {inner}"),
                    None => inner,
                };
                Ok(wrap(body, *parenthesized))
            }
        }
    }
}

/// Wraps compiled text in parentheses when the source did.
fn wrap(text: String, parenthesized: bool) -> String {
    if parenthesized { format!("({text})") } else { text }
}

/// Parses and compiles a raw query with a backend.
///
/// Compile failures carry the raw query for display.
pub fn compile_str<B: Backend + ?Sized>(query: &str, backend: &B) -> Result<String, QueryError> {
    let node = parse(query)?;
    Compiler::new(backend)
        .compile_query(node.as_ref())
        .map_err(|err| QueryError::from(err).with_query(query))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use sift_query::{Field, QueryErrorKind};

    use super::*;
    use crate::FieldType;

    /// Renders leaves as their field name and text, failing on ranges.
    struct Echo;

    impl Backend for Echo {
        fn eq(&self, field: &Field, value: &str, _: bool) -> Result<String, CompileError> {
            Ok(format!("{field}={value}"))
        }

        fn is_not_null(&self, field: &Field, _: bool) -> Result<String, CompileError> {
            Ok(format!("{field}?"))
        }

        fn gte(&self, field: &Field, value: &str) -> Result<String, CompileError> {
            Ok(format!("{field}>={value}"))
        }

        fn lte(&self, field: &Field, value: &str) -> Result<String, CompileError> {
            Ok(format!("{field}<={value}"))
        }

        fn gt(&self, field: &Field, value: &str) -> Result<String, CompileError> {
            Ok(format!("{field}>{value}"))
        }

        fn lt(&self, field: &Field, value: &str) -> Result<String, CompileError> {
            Ok(format!("{field}<{value}"))
        }

        fn field_search(
            &self,
            _: &Field,
            term: &str,
            negated: bool,
            _: bool,
            _: bool,
        ) -> Result<String, CompileError> {
            Ok(if negated { format!("!{term}") } else { term.to_string() })
        }

        fn range(
            &self,
            _: &Field,
            _: &str,
            _: &str,
            _: bool,
            _: bool,
        ) -> Result<String, CompileError> {
            Err(CompileError::Backend("ranges unsupported".into()))
        }
    }

    fn compiled(query: &str) -> String {
        compile_str(query, &Echo).unwrap()
    }

    #[test]
    fn empty_query_compiles_to_empty_string() {
        assert_eq!(compiled(""), "");
        assert_eq!(Compiler::new(&Echo).compile_query(None).unwrap(), "");
    }

    #[test]
    fn default_operator_is_and() {
        assert_eq!(compiled("a b"), "a AND b");
        assert_eq!(compiled("a b"), compiled("a AND b"));
    }

    #[test]
    fn parentheses_are_preserved() {
        assert_eq!(compiled("(a OR b) AND c"), "(a OR b) AND c");
        assert_eq!(compiled("a OR b AND c"), "a OR b AND c");
        assert_ne!(compiled("(a OR b) AND c"), compiled("a OR b AND c"));
        assert_eq!(compiled("(a)"), "(a)");
        assert_eq!(compiled("((a))"), "((a))");
    }

    #[test]
    fn left_only_prefix() {
        assert_eq!(compiled("NOT a"), "NOT a");
        assert_eq!(compiled("-(a b)"), "NOT (a AND b)");
        assert_eq!(compiled("-a"), "!a");
    }

    #[test]
    fn children_compile_left_to_right() {
        assert_eq!(compiled("x y OR z"), "x AND y OR z");
        assert_eq!(compiled("level:>3 w"), "level>3 AND w");
    }

    #[test]
    fn backend_failures_are_errors() {
        let err = compile_str("a ts:[1 TO 2]", &Echo).unwrap_err();
        assert!(matches!(err.kind, QueryErrorKind::Compile { .. }));
        assert_eq!(err.message(), "ranges unsupported");
        assert_eq!(err.query.as_deref(), Some("a ts:[1 TO 2]"));
    }

    #[test]
    fn field_types_do_not_change_output() {
        let types = HashMap::from([("level".to_string(), FieldType::Number)]);
        let node = parse("level:\"3\"").unwrap().unwrap();
        let plain = Compiler::new(&Echo).compile(&node).unwrap();
        let typed = Compiler::new(&Echo)
            .with_field_types(&types)
            .compile(&node)
            .unwrap();
        assert_eq!(plain, typed);
        assert_eq!(typed, "level=3");
    }
}
