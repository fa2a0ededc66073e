//! Domain actions triggered by keyboard input.

/// Semantic action resolved from a key event via
/// [`crate::config::KeyBindings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the viewer.
    Quit,
    /// Scroll up one line.
    ScrollUp,
    /// Scroll down one line.
    ScrollDown,
    /// Scroll up one viewport.
    PageUp,
    /// Scroll down one viewport.
    PageDown,
    /// Jump to the top of the transcript.
    ScrollToTop,
    /// Jump to the bottom of the transcript.
    ScrollToBottom,
}

impl KeyAction {
    /// Whether the action changes the scroll position (and therefore needs a
    /// sticky engine update).
    pub fn is_scroll(&self) -> bool {
        !matches!(self, Self::Quit)
    }
}
