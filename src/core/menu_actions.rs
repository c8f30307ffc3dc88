//! Keyboard vocabulary for the theme picker.
//!
//! Keys never change state directly; each one names an element to click, so
//! the keyboard goes through exactly the same handlers as the mouse.

use crossterm::event::{KeyCode, KeyModifiers};

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    /// Click the toggle control
    ClickToggle,
    /// Click the close control
    ClickClose,
    /// Click the n-th card (0-based)
    ClickCard(usize),
    Quit,
    /// Key not bound in this context
    None,
}

/// Map a key to an action; card shortcuts only apply while the overlay is shown
pub fn action_for_key(code: KeyCode, modifiers: KeyModifiers, overlay_open: bool) -> PickerAction {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => PickerAction::Quit,
            _ => PickerAction::None,
        };
    }

    match code {
        KeyCode::Char('q') => PickerAction::Quit,
        KeyCode::Char('t') => PickerAction::ClickToggle,
        KeyCode::Esc => PickerAction::ClickClose,
        KeyCode::Char(c @ '1'..='9') if overlay_open => {
            PickerAction::ClickCard(c as usize - '1' as usize)
        }
        _ => PickerAction::None,
    }
}
