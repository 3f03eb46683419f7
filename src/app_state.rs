//! The core state machine: which topic is shown and which endpoint cards are open.
//!
//! State is split in two. [`UiState`] is the serialisable part that every interaction is defined
//! against: it only changes through [`UiState::apply`] with a discrete [`Event`], one at a time.
//! [`AppState`] wraps it with what only the terminal needs (cursors, scroll, focus, the open
//! diagram) and turns key [`Command`]s into events.

use crate::content::{ContentStore, Document};
use crate::diagram::Viewport;
use crate::input::Command;
use crate::navigation::{Sidebar, SidebarRow};
use crate::section::FlowchartRef;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Rows moved by one page scroll.
const PAGE_ROWS: u16 = 10;
/// Cells moved by one vertical pan step.
const PAN_ROWS: f64 = 2.0;
/// Cells moved by one horizontal pan step.
const PAN_COLUMNS: f64 = 4.0;

#[derive(Clone, Debug, PartialEq, Eq)]
/// A discrete user intent applied to [`UiState`].
pub enum Event {
    /// Show the topic with this id.
    SelectTopic(String),
    /// Expand or collapse the section at this index of the active document.
    ToggleSection(usize),
    /// Open or close the sidebar overlay.
    ToggleSidebar,
    /// Close the sidebar overlay.
    CloseSidebar,
    /// Show or hide the nested topics of the sidebar sub-group.
    ToggleSubgroup,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Everything an interaction can change, and nothing else.
///
/// `expanded_sections` only ever holds indices of reference sections of the active document. It is
/// replaced, never merged, when the active topic changes.
pub struct UiState {
    /// Key of the topic being shown.
    pub active_topic_id: String,
    /// Whether the compact-layout overlay is showing.
    pub sidebar_open: bool,
    /// Reference sections currently expanded.
    pub expanded_sections: BTreeSet<usize>,
    /// Whether the sidebar sub-group shows its topics.
    pub subgroup_expanded: bool,
}

/// Reference sections of a topic; empty for unknown topics.
fn reference_sections(store: &ContentStore, topic_id: &str) -> BTreeSet<usize> {
    store
        .lookup(topic_id)
        .map(Document::reference_indices)
        .unwrap_or_default()
}

impl UiState {
    #[must_use]
    /// State at start-up: every reference section of `topic_id` expanded, overlay closed, and the
    /// sub-group open only if the topic lives inside it.
    pub fn initial(topic_id: &str, store: &ContentStore, sidebar: &Sidebar) -> Self {
        Self {
            active_topic_id: topic_id.to_string(),
            sidebar_open: false,
            expanded_sections: reference_sections(store, topic_id),
            subgroup_expanded: sidebar.in_subgroup(topic_id),
        }
    }

    #[must_use]
    /// Whether the section at `index` is an expanded reference section.
    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded_sections.contains(&index)
    }

    /// Applies one event.
    ///
    /// Selecting a different topic re-seeds expansion to all of its reference sections and opens
    /// the sub-group when moving into it from outside. Selecting the active topic again leaves
    /// expansion alone. Either way the overlay closes.
    pub fn apply(&mut self, event: &Event, store: &ContentStore, sidebar: &Sidebar) {
        match event {
            Event::SelectTopic(topic_id) => {
                if *topic_id != self.active_topic_id {
                    let entering = !sidebar.in_subgroup(&self.active_topic_id)
                        && sidebar.in_subgroup(topic_id);
                    self.active_topic_id.clone_from(topic_id);
                    self.expanded_sections = reference_sections(store, topic_id);
                    if entering && !self.subgroup_expanded {
                        self.subgroup_expanded = true;
                        tracing::debug!(topic = %topic_id, "sub-group expanded on entry");
                    }
                    tracing::info!(
                        topic = %topic_id,
                        expanded = self.expanded_sections.len(),
                        "topic selected"
                    );
                }
                self.sidebar_open = false;
            }
            Event::ToggleSection(index) => {
                let toggleable = store
                    .lookup(&self.active_topic_id)
                    .is_some_and(|doc| doc.is_reference_at(*index));
                if !toggleable {
                    return;
                }
                let expanded = if self.expanded_sections.remove(index) {
                    false
                } else {
                    self.expanded_sections.insert(*index);
                    true
                };
                tracing::debug!(section = index, expanded, "section toggled");
            }
            Event::ToggleSidebar => self.sidebar_open = !self.sidebar_open,
            Event::CloseSidebar => self.sidebar_open = false,
            Event::ToggleSubgroup => {
                self.subgroup_expanded = !self.subgroup_expanded;
                tracing::debug!(expanded = self.subgroup_expanded, "sub-group toggled");
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Pane receiving cursor keys in the browse view.
pub enum Focus {
    /// Topic list.
    Sidebar,
    /// Page of the active topic.
    Content,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Determines which screen renders and how commands are interpreted.
pub enum View {
    /// Sidebar and page.
    Browse,
    /// One diagram filling the screen, with pan and zoom.
    Diagram(FlowchartRef),
}

/// Owns the content, the navigation tree and all session state.
pub struct AppState {
    /// Parsed topics.
    pub store: ContentStore,
    /// Navigation tree.
    pub sidebar: Sidebar,
    /// Interaction state.
    pub ui: UiState,
    /// Pane receiving cursor keys.
    pub focus: Focus,
    /// Selected row of [`Sidebar::rows`].
    pub sidebar_cursor: usize,
    /// Selected section of the active document.
    pub section_cursor: usize,
    /// First visible line of the page.
    pub scroll: u16,
    /// Set when the cursor moved and the page should scroll to keep it in view.
    pub follow_cursor: bool,
    /// Active screen.
    pub view: View,
    /// Full-screen camera per diagram, created on first draw.
    pub viewports: BTreeMap<FlowchartRef, Viewport>,
    /// Whether the full-screen diagram shows the minimap.
    pub show_minimap: bool,
    /// Whether the last draw used the compact overlay layout.
    pub compact: bool,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
}

impl AppState {
    #[must_use]
    /// Starts a session on `initial_topic`.
    pub fn new(
        store: ContentStore,
        sidebar: Sidebar,
        initial_topic: &str,
        show_minimap: bool,
    ) -> Self {
        let ui = UiState::initial(initial_topic, &store, &sidebar);
        let mut state = Self {
            store,
            sidebar,
            ui,
            focus: Focus::Content,
            sidebar_cursor: 0,
            section_cursor: 0,
            scroll: 0,
            follow_cursor: false,
            view: View::Browse,
            viewports: BTreeMap::new(),
            show_minimap,
            compact: false,
            message: None,
        };
        state.sync_sidebar_cursor();
        state
    }

    #[must_use]
    /// The document being shown, if the active id resolves.
    pub fn active_document(&self) -> Option<&Document> {
        self.store.lookup(&self.ui.active_topic_id)
    }

    #[must_use]
    /// Sidebar rows as currently visible.
    pub fn sidebar_rows(&self) -> Vec<SidebarRow> {
        self.sidebar.rows(self.ui.subgroup_expanded)
    }

    /// Applies an event to the interaction state and keeps the cursors consistent with it.
    pub fn dispatch(&mut self, event: &Event) {
        let previous = self.ui.active_topic_id.clone();
        self.ui.apply(event, &self.store, &self.sidebar);
        let opened = matches!(event, Event::ToggleSidebar) && self.ui.sidebar_open;
        if self.ui.active_topic_id != previous {
            self.section_cursor = 0;
            self.scroll = 0;
            self.sync_sidebar_cursor();
        } else if opened {
            self.focus = Focus::Sidebar;
            self.sync_sidebar_cursor();
        } else {
            self.clamp_sidebar_cursor();
        }
    }

    /// Puts the sidebar cursor on the active topic when its row is visible.
    fn sync_sidebar_cursor(&mut self) {
        match self
            .sidebar
            .row_of(&self.ui.active_topic_id, self.ui.subgroup_expanded)
        {
            Some(row) => self.sidebar_cursor = row,
            None => self.clamp_sidebar_cursor(),
        }
    }

    /// Keeps the sidebar cursor on a visible, selectable row.
    fn clamp_sidebar_cursor(&mut self) {
        let rows = self.sidebar_rows();
        let valid = rows
            .get(self.sidebar_cursor)
            .is_some_and(SidebarRow::is_selectable);
        if !valid {
            self.sidebar_cursor = rows
                .iter()
                .rposition(SidebarRow::is_selectable)
                .unwrap_or_default();
        }
    }

    /// Whether cursor keys drive the sidebar.
    fn sidebar_has_keys(&self) -> bool {
        if self.compact {
            self.ui.sidebar_open
        } else {
            self.focus == Focus::Sidebar
        }
    }

    /// Interprets one command; returns `false` when the application should quit.
    pub fn handle(&mut self, command: Command) -> bool {
        self.message = None;
        match self.view {
            View::Browse => self.handle_browse(command),
            View::Diagram(reference) => {
                self.handle_diagram(reference, command);
                true
            }
        }
    }

    fn handle_browse(&mut self, command: Command) -> bool {
        match command {
            Command::Quit => return false,
            Command::Back => {
                if self.ui.sidebar_open {
                    self.dispatch(&Event::CloseSidebar);
                    self.focus = Focus::Content;
                }
            }
            Command::ToggleSidebar => {
                self.dispatch(&Event::ToggleSidebar);
                if !self.ui.sidebar_open {
                    self.focus = Focus::Content;
                }
            }
            Command::SwitchFocus => {
                if self.compact {
                    self.dispatch(&Event::ToggleSidebar);
                } else {
                    self.focus = match self.focus {
                        Focus::Sidebar => Focus::Content,
                        Focus::Content => Focus::Sidebar,
                    };
                }
            }
            Command::Left => self.focus = Focus::Sidebar,
            Command::Right => self.focus = Focus::Content,
            Command::Up => self.move_cursor(-1),
            Command::Down => self.move_cursor(1),
            Command::Home => self.move_cursor(isize::MIN),
            Command::End => self.move_cursor(isize::MAX),
            Command::PageUp => self.scroll = self.scroll.saturating_sub(PAGE_ROWS),
            Command::PageDown => self.scroll = self.scroll.saturating_add(PAGE_ROWS),
            Command::Activate => {
                if self.sidebar_has_keys() {
                    self.activate_sidebar_row();
                } else {
                    self.activate_section();
                }
            }
            Command::Toggle => {
                if !self.sidebar_has_keys() {
                    self.toggle_current_section();
                }
            }
            Command::ZoomIn | Command::ZoomOut | Command::FitView | Command::ToggleMinimap => {}
        }
        true
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.sidebar_has_keys() {
            let rows = self.sidebar_rows();
            let selectable: Vec<usize> = rows
                .iter()
                .enumerate()
                .filter(|(_, row)| row.is_selectable())
                .map(|(i, _)| i)
                .collect();
            let current = selectable
                .iter()
                .position(|&i| i >= self.sidebar_cursor)
                .unwrap_or_default();
            let next = step_index(current, delta, selectable.len());
            if let Some(&row) = selectable.get(next) {
                self.sidebar_cursor = row;
            }
        } else {
            let count = self.active_document().map_or(0, |doc| doc.sections.len());
            self.section_cursor = step_index(self.section_cursor, delta, count);
            self.follow_cursor = true;
        }
    }

    fn activate_sidebar_row(&mut self) {
        match self.sidebar_rows().get(self.sidebar_cursor).copied() {
            Some(SidebarRow::Topic { entry, .. }) => {
                self.dispatch(&Event::SelectTopic(entry.id.to_string()));
                self.focus = Focus::Content;
            }
            Some(SidebarRow::SubGroup { .. }) => self.dispatch(&Event::ToggleSubgroup),
            Some(SidebarRow::Group(_)) | None => {}
        }
    }

    fn activate_section(&mut self) {
        let Some(section) = self
            .active_document()
            .and_then(|doc| doc.sections.get(self.section_cursor))
        else {
            return;
        };
        if let Some(reference) = section.flowchart {
            self.open_diagram(reference);
        } else if section.is_reference() {
            self.toggle_current_section();
        } else {
            self.message = Some(format!("{} is always shown in full", section.heading));
        }
    }

    fn toggle_current_section(&mut self) {
        self.dispatch(&Event::ToggleSection(self.section_cursor));
    }

    /// Switches to the full-screen view of a diagram.
    pub fn open_diagram(&mut self, reference: FlowchartRef) {
        tracing::info!(diagram = reference.name(), "diagram opened");
        self.view = View::Diagram(reference);
    }

    fn handle_diagram(&mut self, reference: FlowchartRef, command: Command) {
        match command {
            Command::Back | Command::Quit => {
                tracing::info!(diagram = reference.name(), "diagram closed");
                self.view = View::Browse;
            }
            Command::ToggleMinimap => self.show_minimap = !self.show_minimap,
            Command::FitView => {
                // Refitted against the drawing area on the next frame.
                self.viewports.remove(&reference);
            }
            command => {
                let Some(viewport) = self.viewports.get_mut(&reference) else {
                    return;
                };
                match command {
                    Command::Up => viewport.pan(0.0, -PAN_ROWS),
                    Command::Down => viewport.pan(0.0, PAN_ROWS),
                    Command::Left => viewport.pan(-PAN_COLUMNS, 0.0),
                    Command::Right => viewport.pan(PAN_COLUMNS, 0.0),
                    Command::ZoomIn => viewport.zoom_in(),
                    Command::ZoomOut => viewport.zoom_out(),
                    _ => {}
                }
            }
        }
    }
}

/// Moves `current` by `delta` within `0..len`, saturating at both ends.
fn step_index(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
