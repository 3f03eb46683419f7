use super::{AppState, Event, Focus, UiState, View};
use crate::content::ContentStore;
use crate::diagram::{Point, Viewport};
use crate::input::Command;
use crate::navigation::{Sidebar, SidebarRow};
use crate::section::FlowchartRef;
use std::collections::BTreeSet;

fn fixtures() -> (ContentStore, Sidebar) {
    (ContentStore::builtin().unwrap(), Sidebar::standard())
}

fn select(ui: &mut UiState, id: &str, store: &ContentStore, sidebar: &Sidebar) {
    ui.apply(&Event::SelectTopic(id.to_string()), store, sidebar);
}

fn app() -> AppState {
    let (store, sidebar) = fixtures();
    AppState::new(store, sidebar, "introduction", true)
}

#[test]
fn test_initial_state() {
    let (store, sidebar) = fixtures();
    let ui = UiState::initial("introduction", &store, &sidebar);
    assert_eq!(ui.active_topic_id, "introduction");
    assert!(!ui.sidebar_open);
    assert!(ui.expanded_sections.is_empty());
    assert!(!ui.subgroup_expanded);
}

#[test]
fn test_initial_topic_inside_subgroup_expands_it() {
    let (store, sidebar) = fixtures();
    let ui = UiState::initial("tournaments-api-matches", &store, &sidebar);
    assert!(ui.subgroup_expanded);
    assert!(!ui.expanded_sections.is_empty());
}

#[test]
fn test_selecting_any_topic_expands_exactly_its_reference_sections() {
    let (store, sidebar) = fixtures();
    let mut ui = UiState::initial("introduction", &store, &sidebar);
    for id in store.topic_ids() {
        select(&mut ui, id, &store, &sidebar);
        let doc = store.lookup(id).unwrap();
        for (index, section) in doc.sections.iter().enumerate() {
            assert_eq!(
                ui.is_expanded(index),
                section.is_reference(),
                "{id} section {index} ({})",
                section.heading
            );
        }
        assert!(ui.expanded_sections.iter().all(|&i| i < doc.sections.len()));
    }
}

#[test]
fn test_authentication_seeds_reference_sections() {
    let (store, sidebar) = fixtures();
    let mut ui = UiState::initial("introduction", &store, &sidebar);
    select(&mut ui, "authentication", &store, &sidebar);
    assert_eq!(ui.expanded_sections, BTreeSet::from([1, 2]));
}

#[test]
fn test_toggle_twice_restores_membership() {
    let (store, sidebar) = fixtures();
    let mut ui = UiState::initial("authentication", &store, &sidebar);
    let before = ui.expanded_sections.clone();
    ui.apply(&Event::ToggleSection(2), &store, &sidebar);
    assert!(!ui.is_expanded(2));
    assert!(ui.is_expanded(1));
    ui.apply(&Event::ToggleSection(2), &store, &sidebar);
    assert_eq!(ui.expanded_sections, before);
}

#[test]
fn test_toggling_narrative_or_missing_section_is_a_no_op() {
    let (store, sidebar) = fixtures();
    let mut ui = UiState::initial("authentication", &store, &sidebar);
    let before = ui.clone();
    ui.apply(&Event::ToggleSection(0), &store, &sidebar);
    ui.apply(&Event::ToggleSection(3), &store, &sidebar);
    ui.apply(&Event::ToggleSection(42), &store, &sidebar);
    assert_eq!(ui, before);
}

#[test]
fn test_expansion_does_not_leak_across_topics() {
    let (store, sidebar) = fixtures();
    let mut ui = UiState::initial("authentication", &store, &sidebar);
    ui.apply(&Event::ToggleSection(1), &store, &sidebar);
    ui.apply(&Event::ToggleSection(2), &store, &sidebar);
    assert!(ui.expanded_sections.is_empty());

    select(&mut ui, "teams", &store, &sidebar);
    let teams = store.lookup("teams").unwrap();
    assert_eq!(ui.expanded_sections, teams.reference_indices());

    select(&mut ui, "authentication", &store, &sidebar);
    assert_eq!(ui.expanded_sections, BTreeSet::from([1, 2]));
}

#[test]
fn test_reselecting_active_topic_keeps_expansion() {
    let (store, sidebar) = fixtures();
    let mut ui = UiState::initial("authentication", &store, &sidebar);
    ui.apply(&Event::ToggleSection(2), &store, &sidebar);
    ui.apply(&Event::ToggleSidebar, &store, &sidebar);
    select(&mut ui, "authentication", &store, &sidebar);
    assert_eq!(ui.expanded_sections, BTreeSet::from([1]));
    assert!(!ui.sidebar_open);
}

#[test]
fn test_unknown_topic_has_no_expansion() {
    let (store, sidebar) = fixtures();
    let mut ui = UiState::initial("authentication", &store, &sidebar);
    select(&mut ui, "no-such-topic", &store, &sidebar);
    assert_eq!(ui.active_topic_id, "no-such-topic");
    assert!(ui.expanded_sections.is_empty());
    ui.apply(&Event::ToggleSection(0), &store, &sidebar);
    assert!(ui.expanded_sections.is_empty());
}

#[test]
fn test_subgroup_auto_expands_on_entry_only() {
    let (store, sidebar) = fixtures();
    let mut ui = UiState::initial("teams", &store, &sidebar);
    assert!(!ui.subgroup_expanded);

    select(&mut ui, "tournaments-api-matches", &store, &sidebar);
    assert!(ui.subgroup_expanded);

    // Moving within the sub-group does not reopen it once collapsed.
    ui.apply(&Event::ToggleSubgroup, &store, &sidebar);
    select(&mut ui, "tournaments-api-overview", &store, &sidebar);
    assert!(!ui.subgroup_expanded);

    // Leaving never collapses.
    ui.apply(&Event::ToggleSubgroup, &store, &sidebar);
    select(&mut ui, "teams", &store, &sidebar);
    assert!(ui.subgroup_expanded);

    // Re-entering from outside expands again after a manual collapse.
    ui.apply(&Event::ToggleSubgroup, &store, &sidebar);
    select(&mut ui, "tournaments-api-tournament", &store, &sidebar);
    assert!(ui.subgroup_expanded);
}

#[test]
fn test_overlay_events() {
    let (store, sidebar) = fixtures();
    let mut ui = UiState::initial("introduction", &store, &sidebar);
    ui.apply(&Event::ToggleSidebar, &store, &sidebar);
    assert!(ui.sidebar_open);
    ui.apply(&Event::CloseSidebar, &store, &sidebar);
    assert!(!ui.sidebar_open);
    ui.apply(&Event::ToggleSidebar, &store, &sidebar);
    select(&mut ui, "shop", &store, &sidebar);
    assert!(!ui.sidebar_open);
}

#[test]
fn test_state_serialises_as_camel_case_json() {
    let (store, sidebar) = fixtures();
    let ui = UiState::initial("authentication", &store, &sidebar);
    let json = serde_json::to_value(&ui).unwrap();
    assert_eq!(json["activeTopicId"], "authentication");
    assert_eq!(json["expandedSections"], serde_json::json!([1, 2]));
    assert_eq!(json["sidebarOpen"], false);
    assert_eq!(json["subgroupExpanded"], false);
}

#[test]
fn test_sidebar_cursor_starts_on_active_topic() {
    let app = app();
    let rows = app.sidebar_rows();
    assert!(matches!(
        rows[app.sidebar_cursor],
        SidebarRow::Topic { entry, .. } if entry.id == "introduction"
    ));
}

#[test]
fn test_enter_on_sidebar_topic_selects_it() {
    let mut app = app();
    app.focus = Focus::Sidebar;
    app.handle(Command::Down);
    app.handle(Command::Down);
    assert!(app.handle(Command::Activate));
    assert_eq!(app.ui.active_topic_id, "authentication");
    assert_eq!(app.focus, Focus::Content);
    assert_eq!(app.section_cursor, 0);
}

#[test]
fn test_enter_on_subgroup_row_toggles_it() {
    let mut app = app();
    app.focus = Focus::Sidebar;
    app.handle(Command::End);
    assert!(matches!(
        app.sidebar_rows()[app.sidebar_cursor],
        SidebarRow::SubGroup { .. }
    ));
    app.handle(Command::Activate);
    assert!(app.ui.subgroup_expanded);
    app.handle(Command::Down);
    app.handle(Command::Activate);
    assert_eq!(app.ui.active_topic_id, "tournaments-api-overview");
}

#[test]
fn test_content_keys_toggle_cards() {
    let mut app = app();
    app.dispatch(&Event::SelectTopic("authentication".to_string()));
    app.handle(Command::Down);
    app.handle(Command::Down);
    assert_eq!(app.section_cursor, 2);
    app.handle(Command::Activate);
    assert!(!app.ui.is_expanded(2));
    app.handle(Command::Toggle);
    assert!(app.ui.is_expanded(2));
    app.handle(Command::Down);
    app.handle(Command::Activate);
    assert!(app.message.is_some());
}

#[test]
fn test_diagram_view_round_trip() {
    let mut app = app();
    app.dispatch(&Event::SelectTopic("teams".to_string()));
    app.handle(Command::Activate);
    assert_eq!(app.view, View::Diagram(FlowchartRef::TeamCreation));

    app.viewports.insert(
        FlowchartRef::TeamCreation,
        Viewport {
            center: Point::new(0.0, 0.0),
            zoom: 1.0,
        },
    );
    app.handle(Command::Right);
    app.handle(Command::ZoomIn);
    let viewport = app.viewports[&FlowchartRef::TeamCreation];
    assert!(viewport.center.x > 0.0);
    assert!(viewport.zoom > 1.0);

    app.handle(Command::FitView);
    assert!(app.viewports.is_empty());
    app.handle(Command::ToggleMinimap);
    assert!(!app.show_minimap);

    // `q` leaves the diagram instead of quitting.
    assert!(app.handle(Command::Quit));
    assert_eq!(app.view, View::Browse);
    assert!(!app.handle(Command::Quit));
}

#[test]
fn test_compact_overlay_takes_cursor_keys() {
    let mut app = app();
    app.compact = true;
    app.handle(Command::ToggleSidebar);
    assert!(app.ui.sidebar_open);
    let before = app.sidebar_cursor;
    app.handle(Command::Down);
    assert_ne!(app.sidebar_cursor, before);
    app.handle(Command::Back);
    assert!(!app.ui.sidebar_open);
    assert_eq!(app.focus, Focus::Content);
}
