use super::{render_page, PageView, PayloadKind, Toggle, NOT_FOUND_TEXT};
use crate::app_state::{Event, UiState};
use crate::content::ContentStore;
use crate::navigation::Sidebar;
use crate::section::{FlowchartRef, Method, SectionKind};

fn state(topic: &str) -> (ContentStore, Sidebar, UiState) {
    let store = ContentStore::builtin().unwrap();
    let sidebar = Sidebar::standard();
    let ui = UiState::initial(topic, &store, &sidebar);
    (store, sidebar, ui)
}

fn payload_text(page: &PageView, heading: &str, kind: PayloadKind) -> Option<String> {
    page.sections()
        .iter()
        .find(|s| s.heading == heading)
        .and_then(|s| s.payloads.iter().find(|p| p.kind == kind))
        .map(|p| p.text.clone())
}

#[test]
fn test_unknown_topic_renders_placeholder() {
    let (store, _, ui) = state("definitely-missing");
    let page = render_page(&store, &ui);
    assert_eq!(page, PageView::NotFound);
    assert_eq!(page.to_plain_text(), NOT_FOUND_TEXT);
    assert_eq!(NOT_FOUND_TEXT, "Content not found");
    assert!(page.sections().is_empty());
}

#[test]
fn test_generate_api_key_request_visible_by_default() {
    let (store, _, ui) = state("authentication");
    let page = render_page(&store, &ui);
    let section = page
        .sections()
        .iter()
        .find(|s| s.heading == "Generate API Key")
        .unwrap();
    let badge = section.badge.as_ref().unwrap();
    assert_eq!(badge.method, Some(Method::Post));
    assert_eq!(badge.endpoint.as_deref(), Some("/api/v1/auth/keys"));
    assert_eq!(section.toggle, Toggle::Expanded);
    let request = payload_text(&page, "Generate API Key", PayloadKind::RequestBody).unwrap();
    assert!(request.contains(r#""permissions": ["read", "write"]"#));
}

#[test]
fn test_toggling_generate_api_key_hides_and_reveals_request() {
    let (store, sidebar, mut ui) = state("authentication");
    let index = render_page(&store, &ui)
        .sections()
        .iter()
        .find(|s| s.heading == "Generate API Key")
        .unwrap()
        .index;

    ui.apply(&Event::ToggleSection(index), &store, &sidebar);
    let collapsed = render_page(&store, &ui);
    assert_eq!(collapsed.sections()[index].toggle, Toggle::Collapsed);
    assert!(payload_text(&collapsed, "Generate API Key", PayloadKind::RequestBody).is_none());
    assert!(!collapsed.to_plain_text().contains("\"permissions\""));
    // Heading and badge stay visible while collapsed.
    assert!(collapsed.to_plain_text().contains("POST /api/v1/auth/keys"));

    ui.apply(&Event::ToggleSection(index), &store, &sidebar);
    let expanded = render_page(&store, &ui);
    assert!(payload_text(&expanded, "Generate API Key", PayloadKind::RequestBody).is_some());
}

#[test]
fn test_invite_link_response_follows_toggle() {
    let (store, sidebar, mut ui) = state("introduction");
    ui.apply(&Event::SelectTopic("teams".to_string()), &store, &sidebar);
    let page = render_page(&store, &ui);
    let index = page
        .sections()
        .iter()
        .find(|s| s.heading == "Generate Invite Link")
        .unwrap()
        .index;
    let response = payload_text(&page, "Generate Invite Link", PayloadKind::Response).unwrap();
    assert!(response.contains("\"InviteLink\""));

    ui.apply(&Event::ToggleSection(index), &store, &sidebar);
    let page = render_page(&store, &ui);
    assert!(payload_text(&page, "Generate Invite Link", PayloadKind::Response).is_none());

    ui.apply(&Event::ToggleSection(index), &store, &sidebar);
    let page = render_page(&store, &ui);
    assert!(payload_text(&page, "Generate Invite Link", PayloadKind::Response)
        .unwrap()
        .contains("\"InviteLink\""));
}

#[test]
fn test_payload_order_is_headers_request_response() {
    let (store, _, ui) = state("teams");
    let page = render_page(&store, &ui);
    let create = page
        .sections()
        .iter()
        .find(|s| s.heading == "Create Team")
        .unwrap();
    let kinds: Vec<_> = create.payloads.iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        [
            PayloadKind::Headers,
            PayloadKind::RequestBody,
            PayloadKind::Response
        ]
    );
}

#[test]
fn test_narrative_sections_are_fixed_and_show_code() {
    let (store, _, ui) = state("getting-started");
    let page = render_page(&store, &ui);
    for section in page.sections() {
        assert_eq!(section.toggle, Toggle::Fixed);
        assert!(section.badge.is_none());
    }
    let install = &page.sections()[0];
    assert_eq!(install.payloads.len(), 1);
    assert_eq!(install.payloads[0].kind, PayloadKind::Code);
    assert_eq!(install.payloads[0].language.as_deref(), Some("bash"));
}

#[test]
fn test_diagram_shown_regardless_of_expansion() {
    let (store, _, ui) = state("authentication");
    let page = render_page(&store, &ui);
    assert_eq!(
        page.sections()[0].diagram,
        Some(FlowchartRef::Authentication)
    );
    assert!(page.to_plain_text().contains("[diagram: Authentication Flow]"));
}

#[test]
fn test_plain_text_layout() {
    let (store, _, ui) = state("authentication");
    let text = render_page(&store, &ui).to_plain_text();
    assert!(text.starts_with("Authentication\n==============\n"));
    assert!(text.contains("## ▾ Generate API Key\nPOST /api/v1/auth/keys\n"));
    assert!(text.contains("## Security Best Practices\n"));
    assert!(text.contains("Request Body:\n{"));
}

#[test]
fn test_toggle_follows_section_kind() {
    let (store, _, ui) = state("authentication");
    let page = render_page(&store, &ui);
    let document = store.lookup("authentication").unwrap();
    for (view, section) in page.sections().iter().zip(&document.sections) {
        match section.kind() {
            SectionKind::Narrative => assert_eq!(view.toggle, Toggle::Fixed),
            SectionKind::Reference => assert_ne!(view.toggle, Toggle::Fixed),
        }
    }
}

#[test]
fn test_display_matches_plain_text() {
    let (store, _, ui) = state("teams");
    let page = render_page(&store, &ui);
    assert_eq!(format!("{page}"), page.to_plain_text());
    assert_eq!(PageView::NotFound.to_string(), NOT_FOUND_TEXT);
}
