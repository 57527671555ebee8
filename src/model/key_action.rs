//! Domain-level keyboard actions independent of key bindings.

use super::flow::FlowKind;

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Selection
    /// Select the flow below the current one. Default: j/↓
    SelectNext,
    /// Select the flow above the current one. Default: k/↑
    SelectPrev,
    /// Move the selection ten flows down. Default: Space/Page Down
    SelectPageDown,
    /// Move the selection ten flows up. Default: Page Up
    SelectPageUp,
    /// Select the newest flow. Default: G/End
    SelectLast,
    /// Select the oldest flow. Default: g/Home
    SelectFirst,
    /// Clear the selection. Default: Esc
    ClearSelection,

    // Scrolling without moving the selection
    /// Scroll the viewport up by one row. Default: Ctrl+y
    ScrollUp,
    /// Scroll the viewport down by one row. Default: Ctrl+e
    ScrollDown,

    // Filtering
    /// Toggle one flow kind in the filter. Default: 1-4
    ToggleKind(FlowKind),
    /// Cycle direction filter both → inbound → outbound. Default: d
    CycleDirection,
    /// Reset the filter to all kinds, both directions. Default: a
    ResetFilter,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Signed selection shift for relative selection actions.
    ///
    /// Returns `None` for actions that do not move the selection.
    pub fn selection_shift(&self) -> Option<isize> {
        match self {
            KeyAction::SelectNext => Some(1),
            KeyAction::SelectPrev => Some(-1),
            KeyAction::SelectPageDown => Some(10),
            KeyAction::SelectPageUp => Some(-10),
            KeyAction::SelectLast => Some(isize::MAX),
            KeyAction::SelectFirst => Some(isize::MIN),
            _ => None,
        }
    }
}
