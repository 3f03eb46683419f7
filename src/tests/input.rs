use super::{command_for, Command};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn test_arrows_and_vim_keys_agree() {
    assert_eq!(command_for(press(KeyCode::Up)), Some(Command::Up));
    assert_eq!(command_for(press(KeyCode::Char('k'))), Some(Command::Up));
    assert_eq!(command_for(press(KeyCode::Down)), Some(Command::Down));
    assert_eq!(command_for(press(KeyCode::Char('j'))), Some(Command::Down));
    assert_eq!(command_for(press(KeyCode::Char('h'))), Some(Command::Left));
    assert_eq!(command_for(press(KeyCode::Char('l'))), Some(Command::Right));
}

#[test]
fn test_diagram_keys() {
    assert_eq!(command_for(press(KeyCode::Char('+'))), Some(Command::ZoomIn));
    assert_eq!(command_for(press(KeyCode::Char('='))), Some(Command::ZoomIn));
    assert_eq!(command_for(press(KeyCode::Char('-'))), Some(Command::ZoomOut));
    assert_eq!(command_for(press(KeyCode::Char('0'))), Some(Command::FitView));
    assert_eq!(command_for(press(KeyCode::Char('n'))), Some(Command::ToggleMinimap));
}

#[test]
fn test_sidebar_and_activation_keys() {
    assert_eq!(command_for(press(KeyCode::Char('m'))), Some(Command::ToggleSidebar));
    assert_eq!(command_for(press(KeyCode::Esc)), Some(Command::Back));
    assert_eq!(command_for(press(KeyCode::Enter)), Some(Command::Activate));
    assert_eq!(command_for(press(KeyCode::Char(' '))), Some(Command::Toggle));
    assert_eq!(command_for(press(KeyCode::Tab)), Some(Command::SwitchFocus));
}

#[test]
fn test_ctrl_c_quits_and_other_chords_are_ignored() {
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(command_for(ctrl_c), Some(Command::Quit));
    let ctrl_k = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL);
    assert_eq!(command_for(ctrl_k), None);
}

#[test]
fn test_releases_and_unbound_keys() {
    let release = KeyEvent {
        code: KeyCode::Char('q'),
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    };
    assert_eq!(command_for(release), None);
    assert_eq!(command_for(press(KeyCode::Char('z'))), None);
    assert_eq!(command_for(press(KeyCode::F(5))), None);
}
