//! Error types shared by the content loader, the highlighter and the binary.
//!
//! Content problems are authoring mistakes in the embedded markdown, so they carry the topic and
//! section they were found in. Nothing here is raised by user interaction: an unknown topic id is
//! a page state, not an error.

use thiserror::Error;

#[derive(Debug, Error)]
/// Problems found while turning an embedded markdown topic into a `Document`.
pub enum ContentError {
    /// The tree-sitter markdown grammar could not be loaded into the parser.
    #[error("markdown grammar rejected by tree-sitter: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    /// The heading query failed to compile against the grammar.
    #[error("invalid heading query: {0}")]
    Query(#[from] tree_sitter::QueryError),
    /// The parser returned no tree for the topic source.
    #[error("topic `{topic}` could not be parsed")]
    Unparsable {
        /// Topic id of the offending source.
        topic: String,
    },
    /// The source does not open with a level-one heading.
    #[error("topic `{topic}` has no `#` title heading")]
    MissingTitle {
        /// Topic id of the offending source.
        topic: String,
    },
    /// The document has no sections, or none with a non-empty heading.
    #[error("topic `{topic}` has no `##` sections")]
    Empty {
        /// Topic id of the offending source.
        topic: String,
    },
    /// An `endpoint` block names a method outside GET/POST/PUT/PATCH/DELETE.
    #[error("topic `{topic}`, section `{heading}`: unknown HTTP method `{method}`")]
    UnknownMethod {
        /// Topic id of the offending source.
        topic: String,
        /// Heading of the section holding the block.
        heading: String,
        /// The rejected method token.
        method: String,
    },
    /// A `flowchart` block names a diagram that is not built in.
    #[error("topic `{topic}`, section `{heading}`: unknown diagram `{name}`")]
    UnknownDiagram {
        /// Topic id of the offending source.
        topic: String,
        /// Heading of the section holding the block.
        heading: String,
        /// The rejected diagram name.
        name: String,
    },
    /// An `endpoint` block names neither a method nor a path.
    #[error("topic `{topic}`, section `{heading}`: empty `endpoint` block")]
    EmptyEndpoint {
        /// Topic id of the offending source.
        topic: String,
        /// Heading of the section holding the block.
        heading: String,
    },
    /// A block that the section kind never displays: payloads without an endpoint, or a code
    /// sample beside one.
    #[error("topic `{topic}`, section `{heading}`: `{block}` block is never shown in this section")]
    MisplacedBlock {
        /// Topic id of the offending source.
        topic: String,
        /// Heading of the section holding the block.
        heading: String,
        /// Info string of the stray block.
        block: String,
    },
    /// Two sources were given the same topic id.
    #[error("topic `{topic}` is defined more than once")]
    DuplicateTopic {
        /// The repeated topic id.
        topic: String,
    },
    /// A single-valued block (endpoint, headers, request, response, code, flowchart) appears twice,
    /// or an `endpoint` block names two methods or two paths.
    #[error("topic `{topic}`, section `{heading}`: `{block}` block given more than once")]
    DuplicateBlock {
        /// Topic id of the offending source.
        topic: String,
        /// Heading of the section holding the block.
        heading: String,
        /// Info string of the repeated block.
        block: String,
    },
}

#[derive(Debug, Error)]
/// Top-level failure of the `metaninza-docs` binary and its library entry points.
pub enum Error {
    /// Terminal or file I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The embedded content could not be loaded.
    #[error(transparent)]
    Content(#[from] ContentError),
    /// The configured syntax-highlighting theme is not one of syntect's bundled themes.
    #[error("unknown highlighting theme `{0}`")]
    UnknownTheme(String),
    /// A topic requested on the command line does not exist.
    #[error("unknown topic `{0}`")]
    UnknownTopic(String),
    /// Serialising a document or the UI state failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
