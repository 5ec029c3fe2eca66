//! TOML syntax highlighting for terminal output.

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

use super::colors;

/// Highlights configuration files for the terminal.
pub struct Highlighter {
    /// Language definitions, TOML included.
    syntax_set: SyntaxSet,
    /// Embedded color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// Theme in use.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter with the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights TOML, returning it unchanged when color is off.
    pub fn highlight_toml(&self, content: &str) -> String {
        if !colors::enabled() {
            return content.to_string();
        }

        let syntax = self
            .syntax_set
            .find_syntax_by_extension("toml")
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let theme = self.theme_set.get(self.theme);
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_syntax_is_available() {
        let highlighter = Highlighter::new();
        assert!(highlighter.syntax_set.find_syntax_by_extension("toml").is_some());
    }

    #[test]
    fn highlighting_keeps_the_text() {
        let toml = "[sql]\nimplicit_columns = [\"Body\"]\n";
        let highlighted = Highlighter::new().highlight_toml(toml);
        if colors::enabled() {
            assert!(highlighted.contains("Body"));
            assert!(highlighted.ends_with(colors::RESET));
        } else {
            assert_eq!(highlighted, toml);
        }
    }
}
