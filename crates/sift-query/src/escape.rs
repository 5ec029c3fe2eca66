//! Reversible escaping of syntax that looks like a field separator.
//!
//! The query grammar treats every `:` as the end of a field name. Literal colons in
//! URLs, `host:port` pairs and explicitly escaped `\:` sequences are swapped for
//! placeholders before lexing, and restored once a token has been extracted.
//!
//! The `http://`, `https://` and `localhost:<port>` substitutions only touch the
//! first occurrence in the input. A second URL in the same query keeps its colon and
//! is read as a field prefix.

use std::sync::LazyLock;

use regex::Regex;

/// Placeholder for a literal `\\` sequence.
const BACKSLASH_PLACEHOLDER: &str = "SIFT_BACKSLASH_LITERAL";

/// Placeholder for an escaped `\:`.
const COLON_PLACEHOLDER: &str = "SIFT_COLON";

/// Placeholder for the `http://` scheme.
const HTTP_PLACEHOLDER: &str = "http_COLON_//";

/// Placeholder for the `https://` scheme.
const HTTPS_PLACEHOLDER: &str = "https_COLON_//";

/// Matches `localhost:<port>` with a one to five digit port.
static LOCALHOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"localhost:(\d{1,5})").expect("localhost pattern is valid"));

/// Matches the escaped form of `localhost:<port>`.
static LOCALHOST_ESCAPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"localhost_COLON_(\d{1,5})").expect("escaped localhost pattern is valid")
});

/// Replaces literal colons and backslashes with placeholders so the lexer does not
/// mistake them for syntax.
pub fn escape(query: &str) -> String {
    let text = query.replace(r"\\", BACKSLASH_PLACEHOLDER);
    let text = text.replacen("http://", HTTP_PLACEHOLDER, 1);
    let text = text.replacen("https://", HTTPS_PLACEHOLDER, 1);
    let text = LOCALHOST.replacen(&text, 1, "localhost_COLON_${1}");
    text.replace(r"\:", COLON_PLACEHOLDER)
}

/// Restores the literal text of an extracted token.
///
/// Also turns escaped double quotes (`\"`) into plain quotes.
pub fn unescape(token: &str) -> String {
    let text = token.replace("\\\"", "\"");
    let text = text.replace(BACKSLASH_PLACEHOLDER, "\\");
    let text = text.replacen(HTTP_PLACEHOLDER, "http://", 1);
    let text = text.replacen(HTTPS_PLACEHOLDER, "https://", 1);
    let text = LOCALHOST_ESCAPED.replacen(&text, 1, "localhost:${1}");
    text.replace(COLON_PLACEHOLDER, ":")
}
