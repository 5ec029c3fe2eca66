//! Query parser.
//!
//! Parses a token stream into a query AST using recursive descent.
//!
//! # Grammar
//!
//! ```text
//! query    → or_expr?
//! or_expr  → and_expr ("OR" and_expr)*
//! and_expr → unary (("AND")? unary)*
//! unary    → "NOT" unary | primary
//! primary  → "(" or_expr ")" | "-" "(" or_expr ")" | "-"? field_group | "-"? leaf
//! field_group → FIELD_PREFIX "(" or_expr ")"
//! leaf     → FIELD_PREFIX (WORD | PHRASE | RANGE) | WORD | PHRASE | RANGE
//! ```
//!
//! # Precedence (highest to lowest)
//!
//! 1. Grouping: `(...)`
//! 2. Field prefix: `field:`
//! 3. Negation: `-`
//! 4. `NOT`
//! 5. AND (explicit, or implicit between adjacent terms)
//! 6. OR
//!
//! A `-` directly in front of a leaf sets the leaf's `negated` flag, whether or not
//! the leaf has a field. A `-` after the colon is part of the value. `NOT x` and
//! `-( ... )` become a `LeftOnly` node with the `NOT` prefix.
//!
//! A field group `field:( ... )` applies its field to every leaf inside it that has
//! none, so `foo:(bar baz)` parses like `(foo:bar foo:baz)`. Leaves with their own
//! field keep it. A `-` in front of a field group negates the whole group.
//!
//! Groups and `NOT` chains nest at most [`MAX_DEPTH`] levels deep.

use std::mem;

use tracing::debug;

use crate::{
    ast::{BinaryOperator, Field, Node},
    error::{ParseError, QueryError},
    escape::escape,
    lexer::{Lexeme, Token, tokenize},
};

/// Deepest nesting of groups and `NOT` operators a query may use.
pub const MAX_DEPTH: usize = 256;

/// Recursive descent parser for query expressions.
struct Parser {
    /// Token stream to parse.
    lexemes: Vec<Lexeme>,
    /// Current index in the token stream.
    index: usize,
    /// Groups and `NOT` operators currently open.
    depth: usize,
}

impl Parser {
    /// Creates a new parser from a token stream.
    fn new(lexemes: Vec<Lexeme>) -> Self {
        Self {
            lexemes,
            index: 0,
            depth: 0,
        }
    }

    /// Parses the token stream into a query expression.
    fn parse(mut self) -> Result<Option<Node>, ParseError> {
        if self.lexemes.is_empty() {
            return Ok(None);
        }

        let node = self.parse_or_expr()?;

        if let Some(lexeme) = self.lexemes.get(self.index) {
            let message = match lexeme.token {
                Token::RParen => "unexpected closing parenthesis".to_string(),
                ref other => format!("unexpected token '{other}'"),
            };
            return Err(ParseError::new(message, Some(lexeme.position)));
        }

        Ok(Some(node))
    }

    /// Parses: or_expr → and_expr ("OR" and_expr)*
    fn parse_or_expr(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_and_expr()?;

        while self.check(&Token::Or) {
            self.advance(); // consume OR
            self.expect_operand("OR")?;
            let right = self.parse_and_expr()?;
            left = Node::binary(left, BinaryOperator::Or, right);
        }

        Ok(left)
    }

    /// Parses: and_expr → unary (("AND")? unary)*
    fn parse_and_expr(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            if self.check(&Token::And) {
                self.advance(); // consume AND
                self.expect_operand("AND")?;
            } else if !self.can_start_unary() {
                break;
            }
            let right = self.parse_unary()?;
            left = Node::binary(left, BinaryOperator::And, right);
        }

        Ok(left)
    }

    /// Checks if the current token can start a unary expression.
    fn can_start_unary(&self) -> bool {
        matches!(
            self.peek(),
            Some(
                Token::Word(_)
                    | Token::Phrase(_)
                    | Token::FieldPrefix(_)
                    | Token::Range { .. }
                    | Token::Not
                    | Token::Minus
                    | Token::LParen
            )
        )
    }

    /// Fails unless an operand follows the operator that was just consumed.
    fn expect_operand(&self, operator: &str) -> Result<(), ParseError> {
        if self.can_start_unary() {
            Ok(())
        } else {
            Err(ParseError::new(
                format!("expected expression after {operator}"),
                self.current_position(),
            ))
        }
    }

    /// Parses: unary → "NOT" unary | primary
    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        if self.check(&Token::Not) {
            self.advance(); // consume NOT
            self.expect_operand("NOT")?;
            self.enter()?;
            let inner = self.parse_unary()?;
            self.leave();
            return Ok(Node::not(inner));
        }

        self.parse_primary()
    }

    /// Parses: primary → "(" or_expr ")" | "-" "(" or_expr ")" | "-"? field_group | "-"? leaf
    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let Some(lexeme) = self.lexemes.get(self.index) else {
            return Err(ParseError::new("unexpected end of query", None));
        };
        let position = lexeme.position;

        match lexeme.token.clone() {
            Token::LParen => self.parse_group(),
            Token::FieldPrefix(_) if self.at_field_group() => self.parse_field_group(),
            Token::Minus => {
                self.advance(); // consume -
                match self.peek() {
                    Some(Token::LParen) => Ok(Node::not(self.parse_group()?)),
                    Some(Token::FieldPrefix(_)) if self.at_field_group() => {
                        Ok(Node::not(self.parse_field_group()?))
                    }
                    Some(
                        Token::Word(_)
                        | Token::Phrase(_)
                        | Token::FieldPrefix(_)
                        | Token::Range { .. },
                    ) => Ok(self.parse_leaf()?.negate()),
                    _ => Err(ParseError::new(
                        "expected term or group after '-'",
                        Some(position),
                    )),
                }
            }
            Token::Word(_) | Token::Phrase(_) | Token::FieldPrefix(_) | Token::Range { .. } => {
                self.parse_leaf()
            }
            Token::RParen => Err(ParseError::new(
                "unexpected closing parenthesis",
                Some(position),
            )),
            Token::Or => Err(ParseError::new(
                "unexpected OR (needs expression before it)",
                Some(position),
            )),
            Token::And => Err(ParseError::new(
                "unexpected AND (needs expression before it)",
                Some(position),
            )),
            Token::Not => Err(ParseError::new("unexpected NOT", Some(position))),
        }
    }

    /// Parses: leaf → FIELD_PREFIX (WORD | PHRASE | RANGE) | WORD | PHRASE | RANGE
    fn parse_leaf(&mut self) -> Result<Node, ParseError> {
        let mut field = Field::Implicit;

        if let Some(Token::FieldPrefix(name)) = self.peek() {
            field = Field::Named(name.clone());
            self.advance();
        }

        let Some(lexeme) = self.lexemes.get(self.index) else {
            return Err(ParseError::new(
                format!("expected value after field '{field}:'"),
                None,
            ));
        };

        let node = match &lexeme.token {
            Token::Word(text) => Node::term(field, text.clone()),
            Token::Phrase(text) => Node::quoted(field, text.clone()),
            Token::Range {
                min,
                max,
                inclusive,
            } => Node::range(field, min.clone(), max.clone(), *inclusive),
            other => {
                return Err(ParseError::new(
                    format!("expected value after field '{field}:', found '{other}'"),
                    Some(lexeme.position),
                ));
            }
        };
        self.advance();

        Ok(node)
    }

    /// Parses a parenthesized group, consuming the surrounding parentheses.
    fn parse_group(&mut self) -> Result<Node, ParseError> {
        let open = self.current_position();
        self.enter()?;
        self.advance(); // consume (

        if self.check(&Token::RParen) {
            return Err(ParseError::new("empty parentheses", open));
        }
        let inner = self.parse_or_expr()?;

        if !self.check(&Token::RParen) {
            return Err(ParseError::new(
                "missing closing parenthesis for this group",
                open,
            ));
        }
        self.advance(); // consume )
        self.leave();

        Ok(inner.parenthesize())
    }

    /// True if the current token is a field prefix directly followed by `(`.
    fn at_field_group(&self) -> bool {
        matches!(self.peek(), Some(Token::FieldPrefix(_)))
            && matches!(
                self.lexemes.get(self.index + 1).map(|lexeme| &lexeme.token),
                Some(Token::LParen)
            )
    }

    /// Parses: field_group → FIELD_PREFIX "(" or_expr ")"
    fn parse_field_group(&mut self) -> Result<Node, ParseError> {
        let Some(Token::FieldPrefix(name)) = self.peek().cloned() else {
            return Err(ParseError::new(
                "expected field before group",
                self.current_position(),
            ));
        };
        self.advance(); // consume field prefix

        let group = self.parse_group()?;
        Ok(apply_field(group, &name))
    }

    /// Opens one nesting level, failing past [`MAX_DEPTH`].
    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::new(
                format!("query nested too deeply (more than {MAX_DEPTH} levels)"),
                self.current_position(),
            ));
        }
        Ok(())
    }

    /// Closes the innermost nesting level.
    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&Token> {
        self.lexemes.get(self.index).map(|lexeme| &lexeme.token)
    }

    /// Byte position of the current token, or None at end of input.
    fn current_position(&self) -> Option<usize> {
        self.lexemes.get(self.index).map(|lexeme| lexeme.position)
    }

    /// Checks if the current token has the same kind as the given token.
    fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| mem::discriminant(t) == mem::discriminant(token))
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if self.index < self.lexemes.len() {
            self.index += 1;
        }
    }
}

/// Gives every leaf without a field the field of an enclosing field group.
fn apply_field(node: Node, name: &str) -> Node {
    match node {
        Node::Term {
            field: Field::Implicit,
            text,
            quoted,
            negated,
        } => Node::Term {
            field: Field::named(name),
            text,
            quoted,
            negated,
        },
        Node::RangedTerm {
            field: Field::Implicit,
            min,
            max,
            inclusive,
            negated,
        } => Node::RangedTerm {
            field: Field::named(name),
            min,
            max,
            inclusive,
            negated,
        },
        Node::Binary {
            left,
            right,
            operator,
            parenthesized,
        } => Node::Binary {
            left: Box::new(apply_field(*left, name)),
            right: Box::new(apply_field(*right, name)),
            operator,
            parenthesized,
        },
        Node::LeftOnly {
            left,
            prefix,
            parenthesized,
        } => Node::LeftOnly {
            left: Box::new(apply_field(*left, name)),
            prefix,
            parenthesized,
        },
        leaf => leaf,
    }
}

/// Parses a raw query string into an AST.
///
/// The query is escaped before tokenizing. Returns `Ok(None)` for empty queries,
/// `Ok(Some(node))` for valid queries, or `Err(QueryError)` for invalid syntax.
pub fn parse(query: &str) -> Result<Option<Node>, QueryError> {
    let lexemes = tokenize(query)?;
    let shifted = escape(query) != query;

    let node = Parser::new(lexemes).parse().map_err(|err| {
        let position = if shifted { None } else { err.position };
        QueryError::parse(err.message, position, Some(query.to_string()))
    })?;

    if let Some(node) = &node {
        debug!(query, tree = %node.to_query_string(), "parsed query");
    }
    Ok(node)
}
