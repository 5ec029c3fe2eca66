//! Query lexer (tokenizer).
//!
//! Converts a query string into a stream of positioned tokens for the parser. The
//! input is passed through [`escape`] first, and the text of every extracted token is
//! restored with [`unescape`].

use std::{fmt, iter::Peekable, mem, str::Chars};

use crate::{
    error::LexError,
    escape::{escape, unescape},
};

/// A token in the query language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A bare word: a search value, wildcard pattern or comparison such as `>=100`.
    Word(String),

    /// A quoted phrase (the quotes are stripped, content preserved).
    Phrase(String),

    /// Field prefix (e.g., "level:" produces FieldPrefix("level")).
    FieldPrefix(String),

    /// A `[min TO max]` or `{min TO max}` range.
    Range {
        /// Lower bound.
        min: String,
        /// Upper bound.
        max: String,
        /// True for square brackets.
        inclusive: bool,
    },

    /// The AND keyword (`AND` or `&&`).
    And,

    /// The OR keyword (`OR` or `||`).
    Or,

    /// The NOT keyword.
    Not,

    /// A `-` attached to the following term or group.
    Minus,

    /// Left parenthesis.
    LParen,

    /// Right parenthesis.
    RParen,
}

impl Token {
    /// Short name of the token kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Word(_) => "word",
            Self::Phrase(_) => "phrase",
            Self::FieldPrefix(_) => "field",
            Self::Range { .. } => "range",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Minus => "minus",
            Self::LParen => "lparen",
            Self::RParen => "rparen",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(word) => write!(f, "{word}"),
            Self::Phrase(phrase) => write!(f, "\"{phrase}\""),
            Self::FieldPrefix(name) => write!(f, "{name}:"),
            Self::Range {
                min,
                max,
                inclusive: true,
            } => write!(f, "[{min} TO {max}]"),
            Self::Range {
                min,
                max,
                inclusive: false,
            } => write!(f, "{{{min} TO {max}}}"),
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
            Self::Not => write!(f, "NOT"),
            Self::Minus => write!(f, "-"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
        }
    }
}

/// A token with the byte offset where it starts in the escaped query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    /// The token.
    pub token: Token,
    /// Byte offset of the first character of the token.
    pub position: usize,
}

/// Tokenizes an escaped query string.
struct Lexer<'a> {
    /// The escaped input string.
    input: &'a str,
    /// Character iterator with one-character lookahead.
    chars: Peekable<Chars<'a>>,
    /// Current byte position in input.
    position: usize,
    /// Set after a field prefix: the next token is a literal value.
    expect_value: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
            expect_value: false,
        }
    }

    /// Creates an error at a specific position.
    fn error_at(&self, message: impl Into<String>, position: usize) -> LexError {
        LexError::new(message, Some(position), self.input)
    }

    /// Tokenizes the entire input, returning all tokens or an error.
    fn tokenize(mut self) -> Result<Vec<Lexeme>, LexError> {
        let mut lexemes = Vec::new();

        while let Some(lexeme) = self.next_lexeme()? {
            lexemes.push(lexeme);
        }

        Ok(lexemes)
    }

    /// Returns the next token, or None if at end of input.
    fn next_lexeme(&mut self) -> Result<Option<Lexeme>, LexError> {
        self.skip_whitespace();

        let Some(&ch) = self.chars.peek() else {
            return Ok(None);
        };
        let position = self.position;
        let value_position = mem::take(&mut self.expect_value);

        let token = match ch {
            '"' => self.read_phrase()?,
            '[' | '{' => self.read_range(ch)?,
            '(' => {
                self.advance();
                Token::LParen
            }
            ')' => {
                self.advance();
                Token::RParen
            }
            '-' if !value_position && self.minus_is_attached() => {
                self.advance();
                Token::Minus
            }
            _ => self.read_word(value_position)?,
        };

        Ok(Some(Lexeme { token, position }))
    }

    /// True if the `-` under the cursor is directly followed by a term or group.
    fn minus_is_attached(&self) -> bool {
        let mut rest = self.input[self.position..].chars();
        rest.next();
        matches!(rest.next(), Some(next) if !next.is_whitespace() && next != ')')
    }

    /// Reads a quoted phrase. `\"` does not close the phrase.
    fn read_phrase(&mut self) -> Result<Token, LexError> {
        let start_pos = self.position;
        self.advance(); // consume opening quote

        let mut content = String::new();

        loop {
            match self.chars.peek() {
                Some(&'"') => {
                    self.advance(); // consume closing quote
                    return Ok(Token::Phrase(unescape(&content)));
                }
                Some(&'\\') => {
                    content.push('\\');
                    self.advance();
                    if let Some(&escaped) = self.chars.peek() {
                        content.push(escaped);
                        self.advance();
                    }
                }
                Some(&ch) => {
                    content.push(ch);
                    self.advance();
                }
                None => return Err(self.error_at("unclosed quote", start_pos)),
            }
        }
    }

    /// Reads a `[min TO max]` or `{min TO max}` range.
    fn read_range(&mut self, open: char) -> Result<Token, LexError> {
        let start_pos = self.position;
        self.advance(); // consume opening bracket

        let inclusive = open == '[';
        let close = if inclusive { ']' } else { '}' };
        let mut body = String::new();

        loop {
            match self.chars.peek() {
                Some(&ch) if ch == ']' || ch == '}' => {
                    if ch != close {
                        return Err(self.error_at(
                            format!("mismatched range brackets: '{open}' closed by '{ch}'"),
                            self.position,
                        ));
                    }
                    self.advance();
                    break;
                }
                Some(&ch) => {
                    body.push(ch);
                    self.advance();
                }
                None => return Err(self.error_at("unclosed range", start_pos)),
            }
        }

        let parts: Vec<&str> = body.split_whitespace().collect();
        let [min, "TO", max] = parts.as_slice() else {
            return Err(self.error_at(
                format!("range must look like {open}min TO max{close}"),
                start_pos,
            ));
        };

        Ok(Token::Range {
            min: unescape(min),
            max: unescape(max),
            inclusive,
        })
    }

    /// Reads a word, keyword, or field prefix.
    ///
    /// Directly after a field prefix the word is always a literal value.
    fn read_word(&mut self, value_position: bool) -> Result<Token, LexError> {
        let start_pos = self.position;
        let mut word = String::new();

        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() || ch == '(' || ch == ')' || ch == '"' {
                break;
            }

            if ch == '\\' {
                word.push(ch);
                self.advance();
                if let Some(&escaped) = self.chars.peek() {
                    word.push(escaped);
                    self.advance();
                }
                continue;
            }

            if ch == ':' {
                if value_position {
                    return Err(self.error_at("unexpected ':' in value", self.position));
                }
                if word.is_empty() {
                    return Err(self.error_at("missing field name before ':'", start_pos));
                }
                self.advance(); // consume the colon
                self.expect_value = true;
                return Ok(Token::FieldPrefix(unescape(&word)));
            }

            word.push(ch);
            self.advance();
        }

        if !value_position {
            match word.as_str() {
                "AND" | "&&" => return Ok(Token::And),
                "OR" | "||" => return Ok(Token::Or),
                "NOT" => return Ok(Token::Not),
                _ => {}
            }
        }

        Ok(Token::Word(unescape(&word)))
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Advances to the next character.
    fn advance(&mut self) {
        if let Some(ch) = self.chars.next() {
            self.position += ch.len_utf8();
        }
    }
}

/// Tokenizes a raw query string.
///
/// Positions refer to the escaped form of the query. They coincide with the raw
/// query unless it contains URLs, `localhost:<port>`, `\\` or `\:`.
pub fn tokenize(query: &str) -> Result<Vec<Lexeme>, LexError> {
    let escaped = escape(query);
    Lexer::new(&escaped)
        .tokenize()
        .map_err(|err| err.with_source(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tokenizes and drops positions.
    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|lexeme| lexeme.token)
            .collect()
    }

    fn word(text: &str) -> Token {
        Token::Word(text.into())
    }

    #[test]
    fn empty_input() {
        assert_eq!(tokens(""), vec![]);
        assert_eq!(tokens("   "), vec![]);
    }

    #[test]
    fn words_with_positions() {
        let lexemes = tokenize("error  timeout").unwrap();
        assert_eq!(
            lexemes,
            vec![
                Lexeme {
                    token: word("error"),
                    position: 0
                },
                Lexeme {
                    token: word("timeout"),
                    position: 7
                },
            ]
        );
    }

    #[test]
    fn quoted_phrase() {
        assert_eq!(
            tokens("\"hello world\""),
            vec![Token::Phrase("hello world".into())]
        );
    }

    #[test]
    fn escaped_quote_inside_phrase() {
        assert_eq!(
            tokens(r#""say \"hi\"""#),
            vec![Token::Phrase(r#"say "hi""#.into())]
        );
    }

    #[test]
    fn unclosed_quote_error() {
        let err = tokenize("foo:\"bar").unwrap_err();
        assert_eq!(err.position, Some(4));
        assert!(err.message.contains("unclosed quote"));
    }

    #[test]
    fn keywords_are_upper_case_only() {
        assert_eq!(
            tokens("a AND b OR c NOT d"),
            vec![
                word("a"),
                Token::And,
                word("b"),
                Token::Or,
                word("c"),
                Token::Not,
                word("d"),
            ]
        );
        assert_eq!(tokens("a or b"), vec![word("a"), word("or"), word("b")]);
    }

    #[test]
    fn symbolic_operators() {
        assert_eq!(
            tokens("a && b || c"),
            vec![word("a"), Token::And, word("b"), Token::Or, word("c")]
        );
    }

    #[test]
    fn minus_attaches_to_following_term() {
        assert_eq!(tokens("-foo"), vec![Token::Minus, word("foo")]);
        assert_eq!(
            tokens("-(a)"),
            vec![Token::Minus, Token::LParen, word("a"), Token::RParen]
        );
        assert_eq!(tokens("foo-bar"), vec![word("foo-bar")]);
        assert_eq!(tokens("a - b"), vec![word("a"), word("-"), word("b")]);
    }

    #[test]
    fn field_prefix() {
        assert_eq!(
            tokens("level:error rust"),
            vec![
                Token::FieldPrefix("level".into()),
                word("error"),
                word("rust")
            ]
        );
    }

    #[test]
    fn negated_field_prefix() {
        assert_eq!(
            tokens("-level:error"),
            vec![
                Token::Minus,
                Token::FieldPrefix("level".into()),
                word("error")
            ]
        );
    }

    #[test]
    fn value_after_field_is_literal() {
        assert_eq!(
            tokens("level:-5"),
            vec![Token::FieldPrefix("level".into()), word("-5")]
        );
        assert_eq!(
            tokens("op:AND"),
            vec![Token::FieldPrefix("op".into()), word("AND")]
        );
    }

    #[test]
    fn comparison_values() {
        assert_eq!(
            tokens("duration:>=100"),
            vec![Token::FieldPrefix("duration".into()), word(">=100")]
        );
    }

    #[test]
    fn ranges() {
        assert_eq!(
            tokens("ts:[10 TO 20]"),
            vec![
                Token::FieldPrefix("ts".into()),
                Token::Range {
                    min: "10".into(),
                    max: "20".into(),
                    inclusive: true
                }
            ]
        );
        assert_eq!(
            tokens("{a TO b}"),
            vec![Token::Range {
                min: "a".into(),
                max: "b".into(),
                inclusive: false
            }]
        );
    }

    #[test]
    fn range_errors() {
        let err = tokenize("ts:[1 TO 5").unwrap_err();
        assert!(err.message.contains("unclosed range"));
        assert_eq!(err.position, Some(3));

        let err = tokenize("ts:[1 5]").unwrap_err();
        assert!(err.message.contains("range must look like"));

        let err = tokenize("ts:[1 TO 5}").unwrap_err();
        assert!(err.message.contains("mismatched range brackets"));
    }

    #[test]
    fn colon_errors() {
        let err = tokenize(":foo").unwrap_err();
        assert!(err.message.contains("missing field name"));

        let err = tokenize("a:b:c").unwrap_err();
        assert!(err.message.contains("unexpected ':'"));
        assert_eq!(err.position, Some(3));
    }

    #[test]
    fn escaped_colon_stays_in_word() {
        assert_eq!(tokens(r"a\:b"), vec![word("a:b")]);
    }

    #[test]
    fn urls_are_not_field_prefixes() {
        assert_eq!(
            tokens("url:https://example.com"),
            vec![
                Token::FieldPrefix("url".into()),
                word("https://example.com")
            ]
        );
        assert_eq!(tokens("localhost:8080"), vec![word("localhost:8080")]);
    }

    #[test]
    fn lex_error_position_dropped_when_escaping_shifted_text() {
        let err = tokenize("http://a.com \"open").unwrap_err();
        assert_eq!(err.position, None);
        assert_eq!(err.input, "http://a.com \"open");
    }

    #[test]
    fn display_matches_source_form() {
        let rendered: Vec<String> = tokens("-level:\"x\" OR ts:{1 TO 2}")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered, vec!["-", "level:", "\"x\"", "OR", "ts:", "{1 TO 2}"]);
    }
}
