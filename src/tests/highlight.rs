use super::PayloadHighlighter;
use crate::error::Error;

fn line_text(line: &ratatui::text::Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

#[test]
fn test_default_theme_is_bundled() {
    assert!(PayloadHighlighter::new("base16-ocean.dark").is_ok());
    assert!(PayloadHighlighter::new("InspiredGitHub").is_ok());
}

#[test]
fn test_unknown_theme_is_an_error() {
    let result = PayloadHighlighter::new("no-such-theme");
    assert!(matches!(result, Err(Error::UnknownTheme(name)) if name == "no-such-theme"));
}

#[test]
fn test_highlight_keeps_text_and_line_count() {
    let highlighter = PayloadHighlighter::new("base16-ocean.dark").unwrap();
    let sample = "{\n  \"name\": \"My App Key\",\n  \"permissions\": [\"read\", \"write\"]\n}";
    let lines = highlighter.highlight(sample, Some("json"));
    assert_eq!(lines.len(), 4);
    assert_eq!(line_text(&lines[2]), "  \"permissions\": [\"read\", \"write\"]");
    assert!(lines.iter().all(|l| !line_text(l).ends_with('\n')));
}

#[test]
fn test_unknown_language_falls_back_to_plain_text() {
    let highlighter = PayloadHighlighter::new("base16-ocean.dark").unwrap();
    let lines = highlighter.highlight("Authorization: Bearer x", Some("not-a-language"));
    assert_eq!(lines.len(), 1);
    assert_eq!(line_text(&lines[0]), "Authorization: Bearer x");
}
