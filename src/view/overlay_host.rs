//! Terminal overlay host for the pinned preview.
//!
//! Bridges the sticky engine to the TUI: fragments are ratatui [`Text`]
//! blocks, and the "overlay" is a strip drawn over the top of the transcript
//! area. The engine drives this through the [`OverlayHost`] trait; the draw
//! loop reads the resulting [`OverlaySurface`] each frame.

use crate::sticky::OverlayHost;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};
use std::cell::RefCell;
use std::rc::Rc;

/// What the pinned preview currently shows.
///
/// Shared between the engine's host (writer) and the draw loop (reader).
#[derive(Debug, Default)]
pub struct OverlaySurface {
    mounted: bool,
    visible: bool,
    lines: Vec<Line<'static>>,
    height: u16,
}

impl OverlaySurface {
    /// True once a preview has been rendered and not torn down.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// True when the preview should be drawn this frame.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Preview content, already capped to the display height.
    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    /// Display height of the preview strip in lines.
    pub fn height(&self) -> u16 {
        self.height
    }
}

/// Overlay host rendering previews into a shared [`OverlaySurface`].
#[derive(Debug)]
pub struct TextOverlayHost {
    surface: Rc<RefCell<OverlaySurface>>,
    max_lines: u16,
}

impl TextOverlayHost {
    /// Create a host writing into `surface`, showing at most `max_lines`
    /// lines of any preview.
    pub fn new(surface: Rc<RefCell<OverlaySurface>>, max_lines: u16) -> Self {
        Self {
            surface,
            max_lines: max_lines.max(1),
        }
    }

    fn display_height(&self, height: f64) -> u16 {
        let capped = height.clamp(1.0, f64::from(self.max_lines));
        capped as u16
    }
}

impl OverlayHost for TextOverlayHost {
    type Source = Text<'static>;
    type Fragment = Text<'static>;

    /// Clone the row's text and restyle it as a preview. The source row in
    /// the transcript is left untouched.
    fn prepare_clone(&self, source: &Self::Source) -> Self::Fragment {
        let mut clone = source.clone();
        clone = clone.patch_style(Style::default().add_modifier(Modifier::DIM));
        clone
    }

    fn render(&mut self, fragment: &Self::Fragment, height: f64) {
        let display = self.display_height(height);
        let mut surface = self.surface.borrow_mut();
        surface.mounted = true;
        surface.visible = true;
        surface.lines = fragment
            .lines
            .iter()
            .take(display as usize)
            .cloned()
            .collect();
        surface.height = display;
    }

    fn apply_height(&mut self, height: f64) {
        let display = self.display_height(height);
        let mut surface = self.surface.borrow_mut();
        surface.height = display;
        surface.lines.truncate(display as usize);
    }

    fn show(&mut self) {
        self.surface.borrow_mut().visible = true;
    }

    fn hide(&mut self) {
        self.surface.borrow_mut().visible = false;
    }

    fn teardown(&mut self) {
        let mut surface = self.surface.borrow_mut();
        surface.mounted = false;
        surface.visible = false;
        surface.lines.clear();
        surface.height = 0;
    }
}
