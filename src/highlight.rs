//! Syntax highlighting of payload samples with syntect.

use crate::error::Error;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Bundled syntaxes plus one selected theme.
pub struct PayloadHighlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl PayloadHighlighter {
    /// Loads the bundled syntaxes and the theme called `theme_name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTheme`] if syntect bundles no theme with that name.
    pub fn new(theme_name: &str) -> Result<Self, Error> {
        let mut themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .remove(theme_name)
            .ok_or_else(|| Error::UnknownTheme(theme_name.to_string()))?;
        Ok(Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    fn syntax_for(&self, language: Option<&str>) -> &SyntaxReference {
        language
            .and_then(|token| self.syntaxes.find_syntax_by_token(token))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }

    #[must_use]
    /// One styled line per input line. Lines the highlighter rejects are returned unstyled.
    pub fn highlight(&self, text: &str, language: Option<&str>) -> Vec<Line<'static>> {
        let mut highlighter = HighlightLines::new(self.syntax_for(language), &self.theme);
        LinesWithEndings::from(text)
            .map(|line| match highlighter.highlight_line(line, &self.syntaxes) {
                Ok(ranges) => Line::from(
                    ranges
                        .into_iter()
                        .map(|(style, piece)| {
                            Span::styled(
                                piece.trim_end_matches(['\n', '\r']).to_string(),
                                convert_style(style),
                            )
                        })
                        .collect::<Vec<_>>(),
                ),
                Err(err) => {
                    tracing::warn!(%err, "highlighting failed, falling back to plain text");
                    Line::from(line.trim_end_matches(['\n', '\r']).to_string())
                }
            })
            .collect()
    }
}

fn convert_style(style: syntect::highlighting::Style) -> Style {
    let fg = style.foreground;
    let mut converted = Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b));
    if style.font_style.contains(FontStyle::BOLD) {
        converted = converted.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        converted = converted.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        converted = converted.add_modifier(Modifier::UNDERLINED);
    }
    converted
}

#[cfg(test)]
#[path = "tests/highlight.rs"]
mod tests;
