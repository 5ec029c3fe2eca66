//! Query escaping, parsing and AST for the sift search syntax.
//!
//! The syntax is a field-oriented log filter language:
//!
//! - **Terms**: `timeout` - whole word match on the default text column
//! - **Phrases**: `"connection reset"` - quoted text
//! - **Fields**: `level:error`, `service:"check out"` - scope a value to a field
//! - **Wildcards**: `*err*`, `err*`, `*err`, `service:*`
//! - **Comparisons**: `duration:>=100`, `status:<500`
//! - **Ranges**: `ts:[10 TO 20]` (inclusive), `ts:{10 TO 20}` (exclusive)
//! - **Negation**: `-debug`, `-level:info`, `NOT (a OR b)`, `-(a b)`
//! - **Boolean operators**: `AND`/`&&` (also implied by adjacency), `OR`/`||`
//! - **Grouping**: `(a OR b) c`
//!
//! Colons inside URLs, `localhost:<port>`, and `\:` are literal text.
//!
//! # Example
//!
//! ```
//! use sift_query::{Field, Node, parse};
//!
//! let node = parse("level:error -service:*checkout*").unwrap().unwrap();
//! assert_eq!(node.fields(), vec!["level", "service"]);
//! assert!(matches!(node, Node::Binary { .. }));
//!
//! let leaf = parse("level:-5").unwrap().unwrap();
//! assert_eq!(leaf, Node::term(Field::named("level"), "-5"));
//! ```

#![warn(missing_docs)]

mod ast;
mod error;
mod escape;
mod lexer;
mod parser;

pub use ast::{BinaryOperator, Field, Node};
pub use error::{LexError, ParseError, QueryError, QueryErrorKind};
pub use escape::{escape, unescape};
pub use lexer::{Lexeme, Token, tokenize};
pub use parser::{MAX_DEPTH, parse};
