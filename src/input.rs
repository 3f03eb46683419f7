//! Key bindings.
//!
//! Keys map to view-independent [`Command`]s; what a command does depends on the view and focus,
//! which is decided in [`crate::app_state::AppState::handle`].

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A key press after binding resolution.
pub enum Command {
    /// `q`: quit, or leave the full-screen diagram.
    Quit,
    /// `Esc`: close the overlay or leave the full-screen diagram.
    Back,
    /// `↑`/`k`: previous row, or pan up.
    Up,
    /// `↓`/`j`: next row, or pan down.
    Down,
    /// `←`/`h`: focus the sidebar, or pan left.
    Left,
    /// `→`/`l`: focus the page, or pan right.
    Right,
    /// `Home`/`g`: first row.
    Home,
    /// `End`/`G`: last row.
    End,
    /// `PageUp`: scroll the page up.
    PageUp,
    /// `PageDown`: scroll the page down.
    PageDown,
    /// `Enter`: select a topic, toggle a card, or open a diagram.
    Activate,
    /// `Space`: toggle the card under the cursor.
    Toggle,
    /// `Tab`: swap focus between sidebar and page.
    SwitchFocus,
    /// `m`: open or close the sidebar overlay.
    ToggleSidebar,
    /// `+`/`=`: zoom in.
    ZoomIn,
    /// `-`: zoom out.
    ZoomOut,
    /// `0`: fit the diagram to the screen.
    FitView,
    /// `n`: show or hide the minimap.
    ToggleMinimap,
}

#[must_use]
/// Resolves a key event; releases and unbound keys yield `None`.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(Command::Quit);
    }
    let command = match key.code {
        KeyCode::Char('q') => Command::Quit,
        KeyCode::Esc => Command::Back,
        KeyCode::Up | KeyCode::Char('k') => Command::Up,
        KeyCode::Down | KeyCode::Char('j') => Command::Down,
        KeyCode::Left | KeyCode::Char('h') => Command::Left,
        KeyCode::Right | KeyCode::Char('l') => Command::Right,
        KeyCode::Home | KeyCode::Char('g') => Command::Home,
        KeyCode::End | KeyCode::Char('G') => Command::End,
        KeyCode::PageUp => Command::PageUp,
        KeyCode::PageDown => Command::PageDown,
        KeyCode::Enter => Command::Activate,
        KeyCode::Char(' ') => Command::Toggle,
        KeyCode::Tab => Command::SwitchFocus,
        KeyCode::Char('m') => Command::ToggleSidebar,
        KeyCode::Char('+' | '=') => Command::ZoomIn,
        KeyCode::Char('-') => Command::ZoomOut,
        KeyCode::Char('0') => Command::FitView,
        KeyCode::Char('n') => Command::ToggleMinimap,
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
