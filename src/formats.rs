//! Format trait and implementations for topic source documents.
//!
//! This module defines the `Format` trait which abstracts over the grammar a topic page is
//! authored in. A format supplies the tree-sitter language, the query that locates headings, and
//! the walk that turns the parse tree into a [`Document`].

pub mod markdown;

use crate::content::Document;
use crate::error::ContentError;

/// A source grammar that topic pages can be written in.
pub trait Format {
    /// Tree-sitter grammar for the source language.
    fn language(&self) -> tree_sitter::Language;

    /// Query capturing every heading node as `@heading`.
    fn section_query(&self) -> &str;

    /// Parses the source of one topic into a document.
    ///
    /// # Errors
    ///
    /// Returns a [`ContentError`] when the grammar cannot be loaded or the source breaks the
    /// authoring conventions (missing title, unknown method, repeated block, ...).
    fn parse_document(&self, topic: &str, source: &str) -> Result<Document, ContentError>;
}
