//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crate::model::FlowKind;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings with option to override via configuration.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only the code and modifiers take part in the lookup; event kind and
    /// state are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    /// Add or replace a binding.
    pub fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;

        // Selection, vim-style and arrows
        keys.bind(KeyCode::Char('j'), none, KeyAction::SelectNext);
        keys.bind(KeyCode::Down, none, KeyAction::SelectNext);
        keys.bind(KeyCode::Char('k'), none, KeyAction::SelectPrev);
        keys.bind(KeyCode::Up, none, KeyAction::SelectPrev);

        // Page-sized selection jumps
        keys.bind(KeyCode::PageDown, none, KeyAction::SelectPageDown);
        keys.bind(KeyCode::Char(' '), none, KeyAction::SelectPageDown);
        keys.bind(KeyCode::PageUp, none, KeyAction::SelectPageUp);

        // Ends of the list
        keys.bind(KeyCode::Char('g'), none, KeyAction::SelectFirst);
        keys.bind(KeyCode::Home, none, KeyAction::SelectFirst);
        keys.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::SelectLast);
        keys.bind(KeyCode::Char('G'), none, KeyAction::SelectLast);
        keys.bind(KeyCode::End, none, KeyAction::SelectLast);

        keys.bind(KeyCode::Esc, none, KeyAction::ClearSelection);

        // Scrolling without touching the selection
        keys.bind(KeyCode::Char('e'), KeyModifiers::CONTROL, KeyAction::ScrollDown);
        keys.bind(KeyCode::Char('y'), KeyModifiers::CONTROL, KeyAction::ScrollUp);

        // Filters
        for (digit, kind) in ('1'..='4').zip(FlowKind::ALL) {
            keys.bind(KeyCode::Char(digit), none, KeyAction::ToggleKind(kind));
        }
        keys.bind(KeyCode::Char('d'), none, KeyAction::CycleDirection);
        keys.bind(KeyCode::Char('a'), none, KeyAction::ResetFilter);

        // Application controls
        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        keys
    }
}
