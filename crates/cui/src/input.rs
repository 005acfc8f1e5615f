use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    Back,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    NextTab,
    PrevTab,
    Activate,
    GotIt,
    SkipCard,
    NextCard,
    ToggleHint,
    ToggleTimer,
    ResetTimer,
    EndTurn,
    GoRambo,
    AddCard,
    DeleteCard,
    ImportCards,
    ExportCards,
}

/// Keys are screen-sensitive: `e` ends a turn mid-game but exports cards in
/// the studio. Shared navigation keys come first so every screen agrees on
/// them.
pub fn map_key(screen: Screen, key: KeyEvent) -> InputAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => InputAction::Quit,
            _ => InputAction::None,
        };
    }
    match key.code {
        KeyCode::Esc => return InputAction::Back,
        KeyCode::Enter => return InputAction::Activate,
        KeyCode::Tab => return InputAction::NextTab,
        KeyCode::BackTab => return InputAction::PrevTab,
        KeyCode::Up => return InputAction::MoveUp,
        KeyCode::Down => return InputAction::MoveDown,
        KeyCode::Left => return InputAction::MoveLeft,
        KeyCode::Right => return InputAction::MoveRight,
        KeyCode::Char('q') => return InputAction::Quit,
        KeyCode::Char('?') => return InputAction::ToggleHelp,
        KeyCode::Char('k') => return InputAction::MoveUp,
        KeyCode::Char('j') => return InputAction::MoveDown,
        KeyCode::Char('h') => return InputAction::MoveLeft,
        KeyCode::Char('l') => return InputAction::MoveRight,
        _ => {}
    }
    match screen {
        Screen::Playing => match key.code {
            KeyCode::Char('g') => InputAction::GotIt,
            KeyCode::Char('s') => InputAction::SkipCard,
            KeyCode::Char(' ') => InputAction::NextCard,
            KeyCode::Char('d') => InputAction::ToggleHint,
            KeyCode::Char('t') => InputAction::ToggleTimer,
            KeyCode::Char('r') => InputAction::ResetTimer,
            KeyCode::Char('e') => InputAction::EndTurn,
            KeyCode::Char('b') => InputAction::GoRambo,
            _ => InputAction::None,
        },
        Screen::Cards => match key.code {
            KeyCode::Char('a') => InputAction::AddCard,
            KeyCode::Char('x') | KeyCode::Delete => InputAction::DeleteCard,
            KeyCode::Char('i') => InputAction::ImportCards,
            KeyCode::Char('e') => InputAction::ExportCards,
            _ => InputAction::None,
        },
        Screen::Menu | Screen::TurnBreak | Screen::RoundBreak | Screen::Final => InputAction::None,
    }
}
