//! Markdown format implementation using tree-sitter-md.
//!
//! Topic pages are plain markdown with a few conventions:
//!
//! ```text
//! # Title                     -> Document::title
//! Lead paragraph(s)           -> Document::description
//! ## Heading                  -> one Section
//! ### Heading                 -> Block::Subheading inside the current section
//! ```endpoint  POST /path     -> Section::method / Section::endpoint
//! ```headers / request / response / flowchart
//! ```<anything else>          -> Section::code
//! ```
//!
//! Paragraphs, lists and pipe tables become typed blocks; inline markup is left in the text for
//! the renderer to style.

use crate::content::Document;
use crate::error::ContentError;
use crate::formats::Format;
use crate::section::{Block, CodeBlock, FlowchartRef, ListEntry, Method, Section, SectionKind};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// Tree-sitter queries and block walk for ATX-style markdown (`#` headings).
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn section_query(&self) -> &'static str {
        "(atx_heading) @heading"
    }

    fn parse_document(&self, topic: &str, source: &str) -> Result<Document, ContentError> {
        let language = self.language();
        let mut parser = Parser::new();
        parser.set_language(&language)?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ContentError::Unparsable {
                topic: topic.to_string(),
            })?;
        let query = Query::new(&language, self.section_query())?;

        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());

        let mut title = None;
        let mut description = String::new();
        let mut sections = Vec::new();

        while let Some(found) = matches.next() {
            for capture in found.captures {
                let heading = capture.node;
                match heading_level(heading) {
                    Some(1) if title.is_none() => {
                        title = Some(heading_text(heading, source));
                        if let Some(container) = heading.parent() {
                            description = lead_paragraphs(container, source);
                        }
                    }
                    Some(2) => {
                        let mut section = Section::new(heading_text(heading, source));
                        if let Some(container) = heading.parent() {
                            collect_blocks(topic, container, source, &mut section, false)?;
                        }
                        check_placement(topic, &section)?;
                        sections.push(section);
                    }
                    // Deeper headings are picked up as subheadings by the section walk.
                    _ => {}
                }
            }
        }

        let title = title.ok_or_else(|| ContentError::MissingTitle {
            topic: topic.to_string(),
        })?;
        if sections.iter().all(|s| s.heading.is_empty()) {
            return Err(ContentError::Empty {
                topic: topic.to_string(),
            });
        }

        Ok(Document {
            title,
            description,
            sections,
        })
    }
}

fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or_default()
}

/// Collapses a multi-line markdown run into one logical line.
fn join_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn heading_level(heading: Node<'_>) -> Option<usize> {
    let mut walker = heading.walk();
    let level = heading
        .children(&mut walker)
        .find_map(|child| match child.kind() {
            "atx_h1_marker" => Some(1),
            "atx_h2_marker" => Some(2),
            "atx_h3_marker" => Some(3),
            "atx_h4_marker" => Some(4),
            "atx_h5_marker" => Some(5),
            "atx_h6_marker" => Some(6),
            _ => None,
        });
    level
}

fn heading_text(heading: Node<'_>, source: &str) -> String {
    let mut walker = heading.walk();
    let text = heading
        .children(&mut walker)
        .find(|child| child.kind() == "inline")
        .map(|inline| node_text(inline, source).trim().to_string())
        .unwrap_or_default();
    text
}

/// Paragraphs between the title heading and the first nested section.
fn lead_paragraphs(container: Node<'_>, source: &str) -> String {
    let mut walker = container.walk();
    let mut paragraphs = Vec::new();
    for child in container.children(&mut walker) {
        match child.kind() {
            "paragraph" => paragraphs.push(join_lines(node_text(child, source))),
            "section" => break,
            _ => {}
        }
    }
    paragraphs.join(" ")
}

fn collect_blocks(
    topic: &str,
    container: Node<'_>,
    source: &str,
    section: &mut Section,
    nested: bool,
) -> Result<(), ContentError> {
    let mut walker = container.walk();
    for child in container.children(&mut walker) {
        match child.kind() {
            "atx_heading" if nested => section.blocks.push(Block::Subheading {
                text: heading_text(child, source),
            }),
            "paragraph" => section.blocks.push(Block::Paragraph {
                text: join_lines(node_text(child, source)),
            }),
            "list" => section.blocks.push(list_block(child, source)),
            "pipe_table" => section.blocks.push(table_block(child, source)),
            "fenced_code_block" => apply_fence(topic, child, source, section)?,
            "section" => collect_blocks(topic, child, source, section, true)?,
            _ => {}
        }
    }
    Ok(())
}

fn list_block(list: Node<'_>, source: &str) -> Block {
    let mut items = Vec::new();
    let ordered = first_marker_is_ordered(list);
    collect_list_items(list, source, 0, &mut items);
    Block::List { ordered, items }
}

fn first_marker_is_ordered(list: Node<'_>) -> bool {
    let mut walker = list.walk();
    let Some(item) = list.children(&mut walker).find(|c| c.kind() == "list_item") else {
        return false;
    };
    let mut item_walker = item.walk();
    let ordered = item.children(&mut item_walker).any(|child| {
        matches!(
            child.kind(),
            "list_marker_dot" | "list_marker_parenthesis"
        )
    });
    ordered
}

fn collect_list_items(list: Node<'_>, source: &str, depth: usize, items: &mut Vec<ListEntry>) {
    let mut walker = list.walk();
    for item in list.children(&mut walker) {
        if item.kind() != "list_item" {
            continue;
        }
        let mut text = Vec::new();
        let mut nested = Vec::new();
        let mut item_walker = item.walk();
        for part in item.children(&mut item_walker) {
            match part.kind() {
                "paragraph" => text.push(join_lines(node_text(part, source))),
                "list" => nested.push(part),
                _ => {}
            }
        }
        items.push(ListEntry {
            depth,
            text: text.join(" "),
        });
        for sublist in nested {
            collect_list_items(sublist, source, depth + 1, items);
        }
    }
}

fn table_block(table: Node<'_>, source: &str) -> Block {
    let mut header = Vec::new();
    let mut rows = Vec::new();
    let mut walker = table.walk();
    for row in table.children(&mut walker) {
        match row.kind() {
            "pipe_table_header" => header = table_cells(row, source),
            "pipe_table_row" => rows.push(table_cells(row, source)),
            _ => {}
        }
    }
    Block::Table { header, rows }
}

fn table_cells(row: Node<'_>, source: &str) -> Vec<String> {
    let mut walker = row.walk();
    let cells = row
        .children(&mut walker)
        .filter(|cell| cell.kind() == "pipe_table_cell")
        .map(|cell| node_text(cell, source).trim().to_string())
        .collect();
    cells
}

/// Payloads only render under an endpoint, and code samples only without one.
fn check_placement(topic: &str, section: &Section) -> Result<(), ContentError> {
    let stray = match section.kind() {
        SectionKind::Reference => section.code.as_ref().map(|_| "code"),
        SectionKind::Narrative => [
            ("headers", &section.headers),
            ("request", &section.request_body),
            ("response", &section.response),
        ]
        .into_iter()
        .find_map(|(block, slot)| slot.as_ref().map(|_| block)),
    };
    match stray {
        Some(block) => Err(ContentError::MisplacedBlock {
            topic: topic.to_string(),
            heading: section.heading.clone(),
            block: block.to_string(),
        }),
        None => Ok(()),
    }
}

fn apply_fence(
    topic: &str,
    fence: Node<'_>,
    source: &str,
    section: &mut Section,
) -> Result<(), ContentError> {
    let mut info = "";
    let mut body = "";
    let mut walker = fence.walk();
    for child in fence.children(&mut walker) {
        match child.kind() {
            "info_string" => info = node_text(child, source).trim(),
            "code_fence_content" => body = node_text(child, source),
            _ => {}
        }
    }
    let body = body.trim_end().to_string();
    let heading = section.heading.clone();
    let duplicate = |block: &str| ContentError::DuplicateBlock {
        topic: topic.to_string(),
        heading: heading.clone(),
        block: block.to_string(),
    };

    match info {
        "endpoint" => {
            if section.is_reference() {
                return Err(duplicate(info));
            }
            for token in body.split_whitespace() {
                if token.starts_with('/') {
                    if section.endpoint.is_some() {
                        return Err(duplicate("endpoint path"));
                    }
                    section.endpoint = Some(token.to_string());
                } else {
                    let method =
                        Method::parse(token).ok_or_else(|| ContentError::UnknownMethod {
                            topic: topic.to_string(),
                            heading: heading.clone(),
                            method: token.to_string(),
                        })?;
                    if section.method.is_some() {
                        return Err(duplicate("endpoint method"));
                    }
                    section.method = Some(method);
                }
            }
            if !section.is_reference() {
                return Err(ContentError::EmptyEndpoint {
                    topic: topic.to_string(),
                    heading: heading.clone(),
                });
            }
        }
        "headers" | "request" | "response" => {
            let slot = match info {
                "headers" => &mut section.headers,
                "request" => &mut section.request_body,
                _ => &mut section.response,
            };
            if slot.is_some() {
                return Err(duplicate(info));
            }
            *slot = Some(body);
        }
        "flowchart" => {
            if section.flowchart.is_some() {
                return Err(duplicate(info));
            }
            let name = body.trim();
            let diagram =
                FlowchartRef::from_name(name).ok_or_else(|| ContentError::UnknownDiagram {
                    topic: topic.to_string(),
                    heading: heading.clone(),
                    name: name.to_string(),
                })?;
            section.flowchart = Some(diagram);
        }
        _ => {
            if section.code.is_some() {
                return Err(duplicate("code"));
            }
            section.code = Some(CodeBlock {
                language: (!info.is_empty()).then(|| info.to_string()),
                text: body,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/markdown.rs"]
mod tests;
