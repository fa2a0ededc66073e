//! Vertical scrolling keyboard action handler.
//!
//! Pure transform on AppState: maps a scroll action to a new clamped offset.
//! Non-scroll actions are no-ops.

use crate::model::KeyAction;
use crate::state::AppState;

/// Apply a scroll keyboard action to the state.
///
/// Line actions move by 1, page actions by the viewport height, jumps go to
/// the extremes. All arithmetic saturates and the result is clamped to
/// `max_scroll_offset`.
pub fn handle_scroll_action(state: &mut AppState, action: KeyAction) {
    let page = state.viewport_lines().max(1);
    let current = state.scroll_offset();

    let target = match action {
        KeyAction::ScrollUp => current.saturating_sub(1),
        KeyAction::ScrollDown => current.saturating_add(1),
        KeyAction::PageUp => current.saturating_sub(page),
        KeyAction::PageDown => current.saturating_add(page),
        KeyAction::ScrollToTop => 0,
        KeyAction::ScrollToBottom => state.max_scroll_offset(),
        KeyAction::Quit => return,
    };

    state.set_scroll_offset(target);
}

#[cfg(test)]
#[path = "scroll_handler_tests.rs"]
mod tests;
