// Keyboard shortcuts for the drawing widget.

use egui::{Event, InputState, Key, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Ctrl/Cmd + S
    Save,
    /// Delete or Backspace; asks for confirmation first.
    Clear,
    /// Escape
    CancelStroke,
    /// Ctrl/Cmd + Z
    Undo,
    /// Ctrl/Cmd + Y
    Redo,
}

/// Map a single key press to a shortcut.
pub fn shortcut_for(key: Key, modifiers: Modifiers) -> Option<Shortcut> {
    if modifiers.command {
        return match key {
            Key::S => Some(Shortcut::Save),
            Key::Z if !modifiers.shift => Some(Shortcut::Undo),
            Key::Y => Some(Shortcut::Redo),
            _ => None,
        };
    }
    match key {
        Key::Delete | Key::Backspace => Some(Shortcut::Clear),
        Key::Escape => Some(Shortcut::CancelStroke),
        _ => None,
    }
}

/// Shortcuts pressed this frame, in event order.
pub fn collect(input: &InputState) -> Vec<Shortcut> {
    input
        .events
        .iter()
        .filter_map(|event| match event {
            Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => shortcut_for(*key, *modifiers),
            _ => None,
        })
        .collect()
}
