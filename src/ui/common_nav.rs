use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::components::TextField;
use crate::app::Transition;

/// Esc means Back on every screen.
pub fn esc_to_back(k: KeyEvent) -> Option<Transition> {
    matches!(k.code, KeyCode::Esc).then_some(Transition::Pop)
}

/// Up/Down/Tab/BackTab focus movement over `count` slots. Returns true if handled.
pub fn move_focus(k: KeyEvent, focus: &mut usize, count: usize) -> bool {
    match k.code {
        KeyCode::Up | KeyCode::BackTab => {
            *focus = if *focus == 0 { count - 1 } else { *focus - 1 };
            true
        }
        KeyCode::Down | KeyCode::Tab => {
            *focus = (*focus + 1) % count;
            true
        }
        _ => false,
    }
}

/// Cursor and edit keys for a focused text field. Returns true if handled.
pub fn edit_field(k: KeyEvent, field: &mut TextField) -> bool {
    match k.code {
        KeyCode::Left => field.move_left(),
        KeyCode::Right => field.move_right(),
        KeyCode::Home => field.home(),
        KeyCode::End => field.end(),
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete(),
        KeyCode::Char(c) if !k.modifiers.contains(KeyModifiers::CONTROL) => field.insert_char(c),
        _ => return false,
    }
    true
}
