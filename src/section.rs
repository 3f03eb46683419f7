//! Section representation for topic documents.
//!
//! A section is one `##` division of a topic page. It always carries a heading and a run of
//! typed body blocks; the remaining fields are optional and describe an HTTP endpoint when one is
//! documented. Whether a section is a collapsible endpoint card or plain prose is derived from
//! those fields by [`Section::is_reference`], never stored.

use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
/// HTTP verb shown in an endpoint badge.
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Method {
    #[must_use]
    /// Parses an upper-case method token as written in an `endpoint` block.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "PATCH" => Some(Self::Patch),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }

    #[must_use]
    /// Canonical upper-case spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
/// Names one of the built-in flow diagrams a section can embed.
pub enum FlowchartRef {
    /// Login/signup → OTP → token issuance.
    Authentication,
    /// Game-id linking → team creation → validation → team created.
    TeamCreation,
}

impl FlowchartRef {
    #[must_use]
    /// Resolves the name used in a `flowchart` block.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "authentication" => Some(Self::Authentication),
            "team-creation" => Some(Self::TeamCreation),
            _ => None,
        }
    }

    #[must_use]
    /// Name used in a `flowchart` block.
    pub fn name(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::TeamCreation => "team-creation",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One bullet or numbered item; nested lists are flattened with a depth.
pub struct ListEntry {
    /// Nesting depth, 0 for top-level items.
    pub depth: usize,
    /// Item text with inline markup left in place.
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Typed body content of a section; the renderer decides how each kind is displayed.
pub enum Block {
    /// Running prose, joined onto a single logical line.
    Paragraph {
        /// Paragraph text with inline markup left in place.
        text: String,
    },
    /// A `###` heading inside the section.
    Subheading {
        /// Heading text.
        text: String,
    },
    /// A bullet or numbered list.
    List {
        /// Whether the list was written with numbered markers.
        ordered: bool,
        /// Items in document order.
        items: Vec<ListEntry>,
    },
    /// A pipe table.
    Table {
        /// Header cells.
        header: Vec<String>,
        /// Body rows, each as a list of cells.
        rows: Vec<Vec<String>>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Free-standing code sample shown under a narrative section.
pub struct CodeBlock {
    /// Info string of the fence, if any (`bash`, `javascript`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Code text without the fences.
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Classification of a section derived from its endpoint fields.
pub enum SectionKind {
    /// Documents one HTTP endpoint; collapsible.
    Reference,
    /// Prose, lists or tables with no endpoint binding; always fully shown.
    Narrative,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// A `##` division of a topic page.
pub struct Section {
    /// Section heading text.
    pub heading: String,
    /// Body blocks in document order.
    pub blocks: Vec<Block>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Code sample, rendered for narrative sections only.
    pub code: Option<CodeBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// HTTP method of the documented endpoint.
    pub method: Option<Method>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Path of the documented endpoint.
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Request headers sample.
    pub headers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Request body sample.
    pub request_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Response body sample.
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Built-in diagram shown under the section.
    pub flowchart: Option<FlowchartRef>,
}

impl Section {
    #[must_use]
    /// A section with only a heading; every optional field absent.
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            blocks: Vec::new(),
            code: None,
            method: None,
            endpoint: None,
            headers: None,
            request_body: None,
            response: None,
            flowchart: None,
        }
    }

    #[must_use]
    /// A section documents an endpoint when it names a method or a path.
    pub fn is_reference(&self) -> bool {
        self.method.is_some() || self.endpoint.is_some()
    }

    #[must_use]
    /// Reference or narrative, per [`Section::is_reference`].
    pub fn kind(&self) -> SectionKind {
        if self.is_reference() {
            SectionKind::Reference
        } else {
            SectionKind::Narrative
        }
    }
}
