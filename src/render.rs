//! The page model: what the content pane shows for the current [`UiState`].
//!
//! [`render_page`] is pure. It resolves the active topic and decides, section by section, which
//! blocks are visible; the terminal UI and the `--render` output both draw from the resulting
//! [`PageView`] and never consult the expansion set themselves.

use crate::app_state::UiState;
use crate::content::ContentStore;
use crate::diagram::Diagram;
use crate::section::{Block, FlowchartRef, Method, Section, SectionKind};
use std::fmt;

/// Placeholder shown when the active topic id does not resolve.
pub const NOT_FOUND_TEXT: &str = "Content not found";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Whether a section can be collapsed, and its current state if so.
pub enum Toggle {
    /// Narrative section, always shown in full.
    Fixed,
    /// Reference section with its payloads visible.
    Expanded,
    /// Reference section with its payloads hidden.
    Collapsed,
}

impl Toggle {
    #[must_use]
    /// Chevron drawn before a reference heading.
    pub fn chevron(self) -> Option<&'static str> {
        match self {
            Self::Fixed => None,
            Self::Expanded => Some("▾"),
            Self::Collapsed => Some("▸"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Method and path of a reference section; either may be missing.
pub struct Badge {
    /// HTTP verb.
    pub method: Option<Method>,
    /// Request path.
    pub endpoint: Option<String>,
}

impl Badge {
    fn of(section: &Section) -> Option<Self> {
        section.is_reference().then(|| Self {
            method: section.method,
            endpoint: section.endpoint.clone(),
        })
    }

    #[must_use]
    /// `METHOD /path`, or whichever half exists.
    pub fn text(&self) -> String {
        match (self.method, &self.endpoint) {
            (Some(method), Some(endpoint)) => format!("{method} {endpoint}"),
            (Some(method), None) => method.to_string(),
            (None, Some(endpoint)) => endpoint.clone(),
            (None, None) => String::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which sample a payload card holds.
pub enum PayloadKind {
    /// Request headers.
    Headers,
    /// Request body.
    RequestBody,
    /// Response body.
    Response,
    /// Free-standing code sample of a narrative section.
    Code,
}

impl PayloadKind {
    #[must_use]
    /// Card title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Headers => "Headers",
            Self::RequestBody => "Request Body",
            Self::Response => "Response",
            Self::Code => "Code",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A visible sample block.
pub struct Payload {
    /// What the sample is.
    pub kind: PayloadKind,
    /// Language hint for highlighting.
    pub language: Option<String>,
    /// Sample text.
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One section as it should appear right now.
pub struct SectionView {
    /// Position in the document, the index used by [`crate::app_state::Event::ToggleSection`].
    pub index: usize,
    /// Heading text.
    pub heading: String,
    /// Endpoint badge for reference sections.
    pub badge: Option<Badge>,
    /// Body blocks, shown in every state.
    pub blocks: Vec<Block>,
    /// Collapse state.
    pub toggle: Toggle,
    /// Samples to show, in display order.
    pub payloads: Vec<Payload>,
    /// Diagram shown under the body, in every state.
    pub diagram: Option<FlowchartRef>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// The content pane for the active topic.
pub enum PageView {
    /// The active topic id does not resolve.
    NotFound,
    /// A resolved document.
    Document {
        /// Page title.
        title: String,
        /// Lead text.
        description: String,
        /// Sections in page order.
        sections: Vec<SectionView>,
    },
}

/// Payloads visible for a section in a given state.
///
/// Expanded reference sections show headers, request body and response, in that order. Collapsed
/// ones show none. Narrative sections show their code sample.
fn visible_payloads(section: &Section, toggle: Toggle) -> Vec<Payload> {
    match toggle {
        Toggle::Collapsed => Vec::new(),
        Toggle::Expanded => [
            (PayloadKind::Headers, &section.headers, None),
            (PayloadKind::RequestBody, &section.request_body, Some("json")),
            (PayloadKind::Response, &section.response, Some("json")),
        ]
        .into_iter()
        .filter_map(|(kind, text, language)| {
            text.as_ref().map(|text| Payload {
                kind,
                language: language.map(str::to_string),
                text: text.clone(),
            })
        })
        .collect(),
        Toggle::Fixed => section
            .code
            .iter()
            .map(|code| Payload {
                kind: PayloadKind::Code,
                language: code.language.clone(),
                text: code.text.clone(),
            })
            .collect(),
    }
}

#[must_use]
/// Builds the page for the active topic of `ui`.
pub fn render_page(store: &ContentStore, ui: &UiState) -> PageView {
    let Some(document) = store.lookup(&ui.active_topic_id) else {
        tracing::debug!(topic = %ui.active_topic_id, "no document for topic");
        return PageView::NotFound;
    };
    let sections = document
        .sections
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let toggle = match section.kind() {
                SectionKind::Narrative => Toggle::Fixed,
                SectionKind::Reference if ui.is_expanded(index) => Toggle::Expanded,
                SectionKind::Reference => Toggle::Collapsed,
            };
            SectionView {
                index,
                heading: section.heading.clone(),
                badge: Badge::of(section),
                blocks: section.blocks.clone(),
                toggle,
                payloads: visible_payloads(section, toggle),
                diagram: section.flowchart,
            }
        })
        .collect();
    PageView::Document {
        title: document.title.clone(),
        description: document.description.clone(),
        sections,
    }
}

impl PageView {
    #[must_use]
    /// Sections of a resolved page; empty for the placeholder.
    pub fn sections(&self) -> &[SectionView] {
        match self {
            Self::NotFound => &[],
            Self::Document { sections, .. } => sections,
        }
    }

    #[must_use]
    /// Unstyled text rendition; the placeholder renders as exactly [`NOT_FOUND_TEXT`].
    pub fn to_plain_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self::Document {
            title,
            description,
            sections,
        } = self
        else {
            return f.write_str(NOT_FOUND_TEXT);
        };
        writeln!(f, "{title}")?;
        writeln!(f, "{}", "=".repeat(title.chars().count()))?;
        if !description.is_empty() {
            writeln!(f, "\n{description}")?;
        }
        for section in sections {
            writeln!(f)?;
            section.write_plain(f)?;
        }
        Ok(())
    }
}

impl SectionView {
    fn write_plain(&self, out: &mut impl fmt::Write) -> fmt::Result {
        match self.toggle.chevron() {
            Some(chevron) => writeln!(out, "## {chevron} {}", self.heading)?,
            None => writeln!(out, "## {}", self.heading)?,
        }
        if let Some(badge) = &self.badge {
            writeln!(out, "{}", badge.text())?;
        }
        for block in &self.blocks {
            writeln!(out)?;
            write_block(block, out)?;
        }
        if let Some(reference) = self.diagram {
            writeln!(out, "\n[diagram: {}]", Diagram::for_ref(reference).title)?;
        }
        for payload in &self.payloads {
            writeln!(out, "\n{}:\n{}", payload.kind.title(), payload.text)?;
        }
        Ok(())
    }
}

fn write_block(block: &Block, out: &mut impl fmt::Write) -> fmt::Result {
    match block {
        Block::Paragraph { text } => writeln!(out, "{text}"),
        Block::Subheading { text } => writeln!(out, "### {text}"),
        Block::List { ordered, items } => {
            let mut number = 0;
            for item in items {
                let indent = "  ".repeat(item.depth);
                if *ordered && item.depth == 0 {
                    number += 1;
                    writeln!(out, "{indent}{number}. {}", item.text)?;
                } else {
                    writeln!(out, "{indent}- {}", item.text)?;
                }
            }
            Ok(())
        }
        Block::Table { header, rows } => {
            writeln!(out, "{}", header.join(" | "))?;
            for row in rows {
                writeln!(out, "{}", row.join(" | "))?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "tests/render.rs"]
mod tests;
