//! Shared keystroke classification.
//!
//! Every selection component routes input through `classify` so the
//! precedence is identical everywhere: cancel keys, then backspace, then
//! navigation, then confirm, then a single printable character, then
//! nothing. What a component *does* with each action differs (backspace
//! cancels a quick pick but edits a search query); what a keystroke *means*
//! does not.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Classified meaning of one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Esc or Ctrl+C.
    Cancel,
    Backspace,
    /// Up arrow or Ctrl+P.
    Up,
    /// Down arrow or Ctrl+N.
    Down,
    /// Enter or Tab.
    Confirm,
    /// A single printable character with no control modifier.
    Char(char),
    /// Anything else; components ignore these.
    Other,
}

/// Classifies a key event. First match wins, in the order documented above.
pub fn classify(key: KeyEvent) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => KeyAction::Cancel,
        KeyCode::Char('c') if ctrl => KeyAction::Cancel,
        KeyCode::Backspace => KeyAction::Backspace,
        KeyCode::Up => KeyAction::Up,
        KeyCode::Char('p') if ctrl => KeyAction::Up,
        KeyCode::Down => KeyAction::Down,
        KeyCode::Char('n') if ctrl => KeyAction::Down,
        KeyCode::Enter | KeyCode::Tab => KeyAction::Confirm,
        KeyCode::Char(c) if !ctrl => KeyAction::Char(c),
        _ => KeyAction::Other,
    }
}

#[cfg(test)]
pub(crate) fn press(code: KeyCode) -> KeyEvent {
    use crossterm::event::{KeyEventKind, KeyEventState};

    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

#[cfg(test)]
pub(crate) fn ctrl(c: char) -> KeyEvent {
    use crossterm::event::{KeyEventKind, KeyEventState};

    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}
