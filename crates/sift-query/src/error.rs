//! Error types for query parsing and compilation.
//!
//! Lexing and parsing each have their own error type. Both convert into
//! [`QueryError`], which carries the query text and renders a caret under the
//! offending position plus a hint for common mistakes.

use std::{error, fmt};

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// Error message.
    pub message: String,
    /// Byte position in input where the error occurred, when it is known.
    pub position: Option<usize>,
    /// The input string.
    pub input: String,
}

impl LexError {
    /// Creates a new lexer error.
    pub fn new(message: impl Into<String>, position: Option<usize>, input: &str) -> Self {
        Self {
            message: message.into(),
            position,
            input: input.to_string(),
        }
    }

    /// Re-targets the error at the raw query the escaped input came from.
    ///
    /// Escaping can shift byte offsets, so the position survives only when the
    /// raw and escaped texts are identical.
    pub fn with_source(mut self, raw: &str) -> Self {
        if self.input != raw {
            self.position = None;
            self.input = raw.to_string();
        }
        self
    }

    /// Formats the error with a position indicator showing where the error occurred.
    pub fn format_with_context(&self) -> String {
        let mut result = format!("query syntax error: {}\n  {}", self.message, self.input);
        if let Some(position) = self.position {
            result.push_str(&format!("\n  {}^", " ".repeat(position)));
        }
        result
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_context())
    }
}

impl error::Error for LexError {}

/// Parse error with token information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Error message.
    pub message: String,
    /// Byte position of the offending token, or None at end of input.
    pub position: Option<usize>,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(message: impl Into<String>, position: Option<usize>) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "at byte {position}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl error::Error for ParseError {}

/// A unified error type for query parsing and compilation.
///
/// This type provides detailed error messages with context, including
/// the original query string and position indicators where applicable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    /// The kind of error that occurred.
    pub kind: QueryErrorKind,
    /// The original query string (if available).
    pub query: Option<String>,
}

/// The specific kind of query error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryErrorKind {
    /// Lexer error (tokenization failed).
    Lex {
        /// Error message.
        message: String,
        /// Byte position in input, if known.
        position: Option<usize>,
    },
    /// Parser error (invalid syntax).
    Parse {
        /// Error message.
        message: String,
        /// Byte position in input, if known.
        position: Option<usize>,
    },
    /// Compilation error (a backend rejected the query).
    Compile {
        /// Error message.
        message: String,
    },
}

impl QueryError {
    /// Creates a lex error.
    pub fn lex(
        message: impl Into<String>,
        position: Option<usize>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            kind: QueryErrorKind::Lex {
                message: message.into(),
                position,
            },
            query: Some(query.into()),
        }
    }

    /// Creates a parse error.
    pub fn parse(
        message: impl Into<String>,
        position: Option<usize>,
        query: Option<String>,
    ) -> Self {
        Self {
            kind: QueryErrorKind::Parse {
                message: message.into(),
                position,
            },
            query,
        }
    }

    /// Creates a compile error.
    pub fn compile(message: impl Into<String>) -> Self {
        Self {
            kind: QueryErrorKind::Compile {
                message: message.into(),
            },
            query: None,
        }
    }

    /// Sets the query string for this error.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Returns the error message without context.
    pub fn message(&self) -> &str {
        match &self.kind {
            QueryErrorKind::Lex { message, .. }
            | QueryErrorKind::Parse { message, .. }
            | QueryErrorKind::Compile { message } => message,
        }
    }

    /// Returns the byte position of the error, if known.
    pub fn position(&self) -> Option<usize> {
        match &self.kind {
            QueryErrorKind::Lex { position, .. } | QueryErrorKind::Parse { position, .. } => {
                *position
            }
            QueryErrorKind::Compile { .. } => None,
        }
    }

    /// Returns a suggestion for common errors.
    pub fn suggestion(&self) -> Option<&'static str> {
        match &self.kind {
            QueryErrorKind::Lex { message, .. } if message.contains("unclosed quote") => {
                Some("Add a closing quote (\") to complete the phrase")
            }
            QueryErrorKind::Lex { message, .. } if message.contains("unclosed range") => {
                Some("Close the range with ] (inclusive) or } (exclusive)")
            }
            QueryErrorKind::Lex { message, .. } if message.contains("range") => {
                Some("Ranges are written field:[min TO max] or field:{min TO max}")
            }
            QueryErrorKind::Lex { message, .. } if message.contains("field name") => {
                Some("Put a field name before ':', or write a literal colon as \\:")
            }
            QueryErrorKind::Lex { message, .. } if message.contains("':'") => {
                Some("Write literal colons in values as \\:")
            }
            QueryErrorKind::Parse { message, .. } if message.contains("closing parenthesis") => {
                Some("Add a closing parenthesis ) to match the opening one")
            }
            QueryErrorKind::Parse { message, .. } if message.contains("after field") => {
                Some("Give the field a value, e.g. level:error or level:\"two words\"")
            }
            QueryErrorKind::Parse { message, .. }
                if message.contains("OR") || message.contains("AND") =>
            {
                Some("AND and OR need expressions on both sides, e.g. 'error OR warn'")
            }
            QueryErrorKind::Compile { message } if message.contains("implicit column") => {
                Some("Set sql.implicit_columns in .sift.toml")
            }
            _ => None,
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match &self.kind {
            QueryErrorKind::Lex { .. } | QueryErrorKind::Parse { .. } => "query syntax error",
            QueryErrorKind::Compile { .. } => "query error",
        };

        writeln!(f, "{prefix}: {}", self.message())?;

        if let Some(query) = &self.query {
            writeln!(f, "  {query}")?;
            if let Some(pos) = self.position() {
                let clamped = pos.min(query.len());
                writeln!(f, "  {}^", " ".repeat(clamped))?;
            }
        }

        if let Some(suggestion) = self.suggestion() {
            write!(f, "hint: {suggestion}")?;
        }

        Ok(())
    }
}

impl error::Error for QueryError {}

impl From<LexError> for QueryError {
    fn from(err: LexError) -> Self {
        Self::lex(err.message, err.position, err.input)
    }
}

impl From<ParseError> for QueryError {
    fn from(err: ParseError) -> Self {
        Self::parse(err.message, err.position, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_display() {
        let err = QueryError::lex("unclosed quote", Some(4), "foo:\"bar");
        let display = err.to_string();
        assert!(display.contains("unclosed quote"));
        assert!(display.contains("  foo:\"bar\n      ^"));
        assert!(display.contains("hint:"));
    }

    #[test]
    fn lex_error_without_position_has_no_caret() {
        let err = LexError::new("unclosed quote", None, "http://x \"a");
        assert!(!err.to_string().contains('^'));
    }

    #[test]
    fn lex_error_displays_caret_as_std_error() {
        let err: Box<dyn error::Error> = Box::new(LexError::new("unclosed range", Some(3), "ts:[1"));
        assert_eq!(
            err.to_string(),
            "query syntax error: unclosed range\n  ts:[1\n     ^"
        );
    }

    #[test]
    fn with_source_keeps_position_for_unchanged_text() {
        let err = LexError::new("unclosed range", Some(3), "ts:[1").with_source("ts:[1");
        assert_eq!(err.position, Some(3));

        let err = LexError::new("unclosed range", Some(3), "aSIFT_COLONb [").with_source(r"a\:b [");
        assert_eq!(err.position, None);
        assert_eq!(err.input, r"a\:b [");
    }

    #[test]
    fn parse_error_display() {
        let err = QueryError::parse(
            "expected closing parenthesis",
            Some(5),
            Some("(rust".to_string()),
        );
        let display = err.to_string();
        assert!(display.contains("expected closing parenthesis"));
        assert!(display.contains("(rust"));
        assert!(display.contains("hint:"));
    }

    #[test]
    fn caret_is_clamped_to_query() {
        let err = QueryError::parse("unexpected end of query", Some(99), Some("a OR".into()));
        assert!(err.to_string().contains("  a OR\n      ^"));
    }

    #[test]
    fn error_with_query() {
        let err = QueryError::parse("test error", None, None).with_query("level:error");
        assert_eq!(err.query.as_deref(), Some("level:error"));
    }

    #[test]
    fn message_extraction() {
        let err = QueryError::lex("test message", Some(0), "query");
        assert_eq!(err.message(), "test message");
    }

    #[test]
    fn operator_error_suggestion() {
        let err = QueryError::parse("expected expression after OR", None, None);
        assert!(err.suggestion().unwrap().contains("both sides"));
    }

    #[test]
    fn compile_error_display() {
        let err = QueryError::compile("no implicit column configured");
        let display = err.to_string();
        assert!(display.starts_with("query error: no implicit column configured"));
        assert!(display.contains("sql.implicit_columns"));
    }
}
