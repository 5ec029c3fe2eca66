//! Query abstract syntax tree.
//!
//! Represents parsed query expressions before compilation to a backend.

use std::fmt;

use serde::Serialize;

/// The field a leaf term searches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Field {
    /// No `field:` prefix was given; the term matches the default text column.
    Implicit,
    /// An explicit, non-empty field name.
    Named(String),
}

impl Field {
    /// Creates a named field.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Returns true for the implicit field.
    pub fn is_implicit(&self) -> bool {
        matches!(self, Self::Implicit)
    }

    /// Returns the field name, or `None` for the implicit field.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Implicit => None,
            Self::Named(name) => Some(name),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Implicit => write!(f, "<implicit>"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Boolean operator joining two sub-expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BinaryOperator {
    /// Both sides must match. Adjacent terms with no keyword use this.
    And,
    /// Either side may match.
    Or,
}

impl BinaryOperator {
    /// The query keyword for this operator.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A parsed query expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// A single value, optionally scoped to a field.
    Term {
        /// Field the value applies to.
        field: Field,
        /// Unescaped value text, without surrounding quotes.
        text: String,
        /// Whether the value was written as a quoted string.
        quoted: bool,
        /// Whether the whole term is negated (`-foo`, `-field:value`).
        negated: bool,
    },

    /// A `[min TO max]` or `{min TO max}` range.
    RangedTerm {
        /// Field the range applies to.
        field: Field,
        /// Lower bound, as written.
        min: String,
        /// Upper bound, as written.
        max: String,
        /// True for square brackets.
        inclusive: bool,
        /// Whether the range is negated (`-field:[a TO b]`).
        negated: bool,
    },

    /// Two sub-expressions joined by a boolean operator.
    Binary {
        /// Left operand.
        left: Box<Self>,
        /// Right operand.
        right: Box<Self>,
        /// Joining operator.
        operator: BinaryOperator,
        /// Whether the source wrapped this expression in parentheses.
        parenthesized: bool,
    },

    /// A single sub-expression, optionally prefixed by a keyword such as `NOT`.
    LeftOnly {
        /// The wrapped expression.
        left: Box<Self>,
        /// Keyword rendered before the expression.
        prefix: Option<String>,
        /// Whether the source wrapped this expression in parentheses.
        parenthesized: bool,
    },
}

impl Node {
    /// Creates an unquoted, non-negated term.
    pub fn term(field: Field, text: impl Into<String>) -> Self {
        Self::Term {
            field,
            text: text.into(),
            quoted: false,
            negated: false,
        }
    }

    /// Creates a quoted, non-negated term.
    pub fn quoted(field: Field, text: impl Into<String>) -> Self {
        Self::Term {
            field,
            text: text.into(),
            quoted: true,
            negated: false,
        }
    }

    /// Creates a non-negated range.
    pub fn range(
        field: Field,
        min: impl Into<String>,
        max: impl Into<String>,
        inclusive: bool,
    ) -> Self {
        Self::RangedTerm {
            field,
            min: min.into(),
            max: max.into(),
            inclusive,
            negated: false,
        }
    }

    /// Joins two expressions with an unparenthesized operator.
    pub fn binary(left: Self, operator: BinaryOperator, right: Self) -> Self {
        Self::Binary {
            left: Box::new(left),
            right: Box::new(right),
            operator,
            parenthesized: false,
        }
    }

    /// Wraps an expression in a `NOT` prefix.
    pub fn not(inner: Self) -> Self {
        Self::LeftOnly {
            left: Box::new(inner),
            prefix: Some("NOT".to_string()),
            parenthesized: false,
        }
    }

    /// Sets the negation flag on a leaf. Combinators are returned unchanged.
    pub fn negate(self) -> Self {
        match self {
            Self::Term {
                field,
                text,
                quoted,
                ..
            } => Self::Term {
                field,
                text,
                quoted,
                negated: true,
            },
            Self::RangedTerm {
                field,
                min,
                max,
                inclusive,
                ..
            } => Self::RangedTerm {
                field,
                min,
                max,
                inclusive,
                negated: true,
            },
            other => other,
        }
    }

    /// Marks the expression as written inside parentheses.
    ///
    /// Combinators carry the flag themselves. Leaves, and expressions that are
    /// already parenthesized, are wrapped in a prefix-less `LeftOnly`.
    pub fn parenthesize(self) -> Self {
        match self {
            Self::Binary {
                left,
                right,
                operator,
                parenthesized: false,
            } => Self::Binary {
                left,
                right,
                operator,
                parenthesized: true,
            },
            Self::LeftOnly {
                left,
                prefix,
                parenthesized: false,
            } => Self::LeftOnly {
                left,
                prefix,
                parenthesized: true,
            },
            other => Self::LeftOnly {
                left: Box::new(other),
                prefix: None,
                parenthesized: true,
            },
        }
    }

    /// Returns true for `Term` and `RangedTerm`.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Term { .. } | Self::RangedTerm { .. })
    }

    /// Named fields referenced by the expression, in order of first appearance.
    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    /// Appends named fields not already present in `out`.
    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Term { field, .. } | Self::RangedTerm { field, .. } => {
                if let Some(name) = field.name()
                    && !out.contains(&name)
                {
                    out.push(name);
                }
            }
            Self::Binary { left, right, .. } => {
                left.collect_fields(out);
                right.collect_fields(out);
            }
            Self::LeftOnly { left, .. } => left.collect_fields(out),
        }
    }

    /// Formats the expression as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Term {
                field,
                text,
                quoted,
                negated,
            } => {
                let mut flags = Vec::new();
                if *quoted {
                    flags.push("quoted");
                }
                if *negated {
                    flags.push("negated");
                }
                if flags.is_empty() {
                    writeln!(f, "{prefix}Term({field} {text:?})")
                } else {
                    writeln!(f, "{prefix}Term({field} {text:?}, {})", flags.join(", "))
                }
            }
            Self::RangedTerm {
                field,
                min,
                max,
                inclusive,
                negated,
            } => {
                let (open, close) = if *inclusive { ('[', ']') } else { ('{', '}') };
                let negation = if *negated { ", negated" } else { "" };
                writeln!(
                    f,
                    "{prefix}Range({field} {open}{min} TO {max}{close}{negation})"
                )
            }
            Self::Binary {
                left,
                right,
                operator,
                parenthesized,
            } => {
                let parens = if *parenthesized { ", parenthesized" } else { "" };
                writeln!(f, "{prefix}Binary({operator}{parens})")?;
                left.fmt_tree(f, indent + 1)?;
                right.fmt_tree(f, indent + 1)
            }
            Self::LeftOnly {
                left,
                prefix: keyword,
                parenthesized,
            } => {
                let parens = if *parenthesized { ", parenthesized" } else { "" };
                match keyword {
                    Some(keyword) => writeln!(f, "{prefix}LeftOnly({keyword}{parens})")?,
                    None => writeln!(f, "{prefix}LeftOnly(group{parens})")?,
                }
                left.fmt_tree(f, indent + 1)
            }
        }
    }

    /// Formats the expression as canonical query text.
    ///
    /// Parsing the result yields an equal tree.
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Term {
                field,
                text,
                quoted,
                negated,
            } => {
                let value = if *quoted {
                    format!("\"{}\"", text.replace('"', "\\\""))
                } else {
                    text.replace(':', "\\:")
                };
                format!("{}{}{value}", negation_prefix(*negated), field_prefix(field))
            }
            Self::RangedTerm {
                field,
                min,
                max,
                inclusive,
                negated,
            } => {
                let (open, close) = if *inclusive { ('[', ']') } else { ('{', '}') };
                format!(
                    "{}{}{open}{min} TO {max}{close}",
                    negation_prefix(*negated),
                    field_prefix(field)
                )
            }
            Self::Binary {
                left,
                right,
                operator,
                parenthesized,
            } => wrap(
                format!(
                    "{} {operator} {}",
                    left.to_query_string(),
                    right.to_query_string()
                ),
                *parenthesized,
            ),
            Self::LeftOnly {
                left,
                prefix,
                parenthesized,
            } => {
                let inner = match prefix {
                    Some(keyword) => format!("{keyword} {}", left.to_query_string()),
                    None => left.to_query_string(),
                };
                wrap(inner, *parenthesized)
            }
        }
    }
}

/// Renders the `-` used by negated leaves.
fn negation_prefix(negated: bool) -> &'static str {
    if negated { "-" } else { "" }
}

/// Renders `name:` for named fields and nothing for the implicit field.
fn field_prefix(field: &Field) -> String {
    match field {
        Field::Implicit => String::new(),
        Field::Named(name) => format!("{}:", name.replace(':', "\\:")),
    }
}

/// Wraps text in parentheses when requested.
fn wrap(text: String, parenthesized: bool) -> String {
    if parenthesized { format!("({text})") } else { text }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}
