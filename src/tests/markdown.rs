use super::MarkdownFormat;
use crate::error::ContentError;
use crate::formats::Format;
use crate::section::{Block, FlowchartRef, Method, SectionKind};

fn parse(source: &str) -> crate::content::Document {
    MarkdownFormat.parse_document("test", source).unwrap()
}

#[test]
fn test_title_and_description() {
    let doc = parse("# Widgets\n\nAll about\nwidgets.\n\n## First\n\nBody.\n");
    assert_eq!(doc.title, "Widgets");
    assert_eq!(doc.description, "All about widgets.");
    assert_eq!(doc.sections.len(), 1);
    assert_eq!(doc.sections[0].heading, "First");
}

#[test]
fn test_sections_in_order() {
    let doc = parse("# T\n\n## One\n\na\n\n## Two\n\nb\n\n## Three\n\nc\n");
    let headings: Vec<_> = doc.sections.iter().map(|s| s.heading.as_str()).collect();
    assert_eq!(headings, ["One", "Two", "Three"]);
}

#[test]
fn test_endpoint_block_sets_method_and_path() {
    let doc = parse("# T\n\n## Create\n\n```endpoint\nPOST /api/v1/things\n```\n\nMakes a thing.\n");
    let section = &doc.sections[0];
    assert_eq!(section.method, Some(Method::Post));
    assert_eq!(section.endpoint.as_deref(), Some("/api/v1/things"));
    assert!(section.is_reference());
    assert_eq!(
        section.blocks,
        vec![Block::Paragraph {
            text: "Makes a thing.".to_string()
        }]
    );
}

#[test]
fn test_method_only_and_path_only_endpoints() {
    let doc = parse("# T\n\n## A\n\n```endpoint\nGET\n```\n\n## B\n\n```endpoint\n/only/path\n```\n");
    assert_eq!(doc.sections[0].method, Some(Method::Get));
    assert_eq!(doc.sections[0].endpoint, None);
    assert_eq!(doc.sections[1].method, None);
    assert_eq!(doc.sections[1].endpoint.as_deref(), Some("/only/path"));
    assert!(doc.sections.iter().all(crate::section::Section::is_reference));
}

#[test]
fn test_payload_blocks() {
    let source = "# T\n\n## Call\n\n```endpoint\nPUT /x\n```\n\n```headers\nAuthorization: Bearer t\n```\n\n```request\n{\"a\": 1}\n```\n\n```response\n{\"ok\": true}\n```\n";
    let section = &parse(source).sections[0];
    assert_eq!(section.headers.as_deref(), Some("Authorization: Bearer t"));
    assert_eq!(section.request_body.as_deref(), Some("{\"a\": 1}"));
    assert_eq!(section.response.as_deref(), Some("{\"ok\": true}"));
    assert!(section.code.is_none());
}

#[test]
fn test_other_fences_become_code() {
    let doc = parse("# T\n\n## Install\n\n```bash\nnpm install x\n```\n");
    let code = doc.sections[0].code.as_ref().unwrap();
    assert_eq!(code.language.as_deref(), Some("bash"));
    assert_eq!(code.text, "npm install x");
    assert!(!doc.sections[0].is_reference());
}

#[test]
fn test_flowchart_reference() {
    let doc = parse("# T\n\n## Flow\n\n```flowchart\nteam-creation\n```\n");
    assert_eq!(doc.sections[0].flowchart, Some(FlowchartRef::TeamCreation));
    assert!(!doc.sections[0].is_reference());
}

#[test]
fn test_lists_tables_and_subheadings() {
    let source = "# T\n\n## Body\n\n### Part\n\n- one\n- two\n  - nested\n\n1. first\n2. second\n\n| A | B |\n|---|---|\n| x | y |\n";
    let blocks = &parse(source).sections[0].blocks;
    assert_eq!(
        blocks[0],
        Block::Subheading {
            text: "Part".to_string()
        }
    );
    let Block::List { ordered, items } = &blocks[1] else {
        panic!("expected a bullet list, got {:?}", blocks[1]);
    };
    assert!(!ordered);
    assert_eq!(items.len(), 3);
    assert_eq!(items[2].depth, 1);
    assert_eq!(items[2].text, "nested");
    assert!(matches!(&blocks[2], Block::List { ordered: true, items } if items.len() == 2));
    assert_eq!(
        blocks[3],
        Block::Table {
            header: vec!["A".to_string(), "B".to_string()],
            rows: vec![vec!["x".to_string(), "y".to_string()]],
        }
    );
}

#[test]
fn test_missing_title_is_an_error() {
    let err = MarkdownFormat
        .parse_document("untitled", "## Only a section\n\nText.\n")
        .unwrap_err();
    assert!(matches!(err, ContentError::MissingTitle { topic } if topic == "untitled"));
}

#[test]
fn test_document_without_sections_is_empty() {
    let err = MarkdownFormat
        .parse_document("bare", "# Title\n\nJust a description.\n")
        .unwrap_err();
    assert!(matches!(err, ContentError::Empty { .. }));
}

#[test]
fn test_unknown_method_is_rejected() {
    let err = MarkdownFormat
        .parse_document("t", "# T\n\n## S\n\n```endpoint\nFETCH /x\n```\n")
        .unwrap_err();
    assert!(matches!(
        err,
        ContentError::UnknownMethod { method, heading, .. } if method == "FETCH" && heading == "S"
    ));
}

#[test]
fn test_unknown_diagram_is_rejected() {
    let err = MarkdownFormat
        .parse_document("t", "# T\n\n## S\n\n```flowchart\ncheckout\n```\n")
        .unwrap_err();
    assert!(matches!(err, ContentError::UnknownDiagram { name, .. } if name == "checkout"));
}

#[test]
fn test_repeated_payload_is_rejected() {
    let source = "# T\n\n## S\n\n```endpoint\nGET /x\n```\n\n```response\n{}\n```\n\n```response\n[]\n```\n";
    let err = MarkdownFormat.parse_document("t", source).unwrap_err();
    assert!(matches!(err, ContentError::DuplicateBlock { block, .. } if block == "response"));
}

#[test]
fn test_endpoint_with_two_paths_is_rejected() {
    let err = MarkdownFormat
        .parse_document("t", "# T\n\n## S\n\n```endpoint\nPOST /a /b\n```\n")
        .unwrap_err();
    assert!(matches!(err, ContentError::DuplicateBlock { block, .. } if block == "endpoint path"));
}

#[test]
fn test_endpoint_with_two_methods_is_rejected() {
    let err = MarkdownFormat
        .parse_document("t", "# T\n\n## S\n\n```endpoint\nGET POST\n```\n")
        .unwrap_err();
    assert!(matches!(err, ContentError::DuplicateBlock { block, .. } if block == "endpoint method"));
}

#[test]
fn test_empty_endpoint_is_rejected() {
    let err = MarkdownFormat
        .parse_document("t", "# T\n\n## S\n\n```endpoint\n\n```\n")
        .unwrap_err();
    assert!(matches!(err, ContentError::EmptyEndpoint { heading, .. } if heading == "S"));
}

#[test]
fn test_payload_without_endpoint_is_rejected() {
    let err = MarkdownFormat
        .parse_document("t", "# T\n\n## Notes\n\n```response\n{}\n```\n")
        .unwrap_err();
    assert!(matches!(
        err,
        ContentError::MisplacedBlock { block, heading, .. } if block == "response" && heading == "Notes"
    ));
}

#[test]
fn test_code_beside_endpoint_is_rejected() {
    let source = "# T\n\n## Call\n\n```bash\ncurl /x\n```\n\n```endpoint\nGET /x\n```\n";
    let err = MarkdownFormat.parse_document("t", source).unwrap_err();
    assert!(matches!(err, ContentError::MisplacedBlock { block, .. } if block == "code"));
}

#[test]
fn test_section_kind_from_endpoint() {
    let doc = parse("# T\n\n## Call\n\n```endpoint\nGET /x\n```\n\n## Notes\n\ntext\n");
    assert_eq!(doc.sections[0].kind(), SectionKind::Reference);
    assert_eq!(doc.sections[1].kind(), SectionKind::Narrative);
}
