//! Overlay host capability and engine-owned overlay state.
//!
//! The engine never touches UI primitives directly. The host owns the
//! container the preview overlay lives in; the engine only tells it what to
//! display. This keeps the engine pure enough to test with a fake host.

use crate::model::RequestId;

/// Capability interface over the UI layer that owns the overlay element.
///
/// Implementations are expected to create the overlay lazily on first
/// [`render`](OverlayHost::render) and to make [`teardown`](OverlayHost::teardown)
/// remove it from the container for good. All calls are synchronous and
/// single-threaded.
pub trait OverlayHost {
    /// Handle to a rendered source row, supplied by snapshots.
    type Source;
    /// Opaque cloned renderable stored in the cache and shown in the overlay.
    type Fragment: Clone;

    /// Produce a sanitized clone of a live source row: identifying marks
    /// stripped, visually tagged as a preview rather than the row itself.
    fn prepare_clone(&self, source: &Self::Source) -> Self::Fragment;

    /// Full re-render: replace the overlay contents with a fresh copy of
    /// `fragment`, apply `height`, and make the overlay visible. Mounts the
    /// overlay into the container if it does not exist yet.
    fn render(&mut self, fragment: &Self::Fragment, height: f64);

    /// Reapply the height without touching contents. Must be idempotent.
    fn apply_height(&mut self, height: f64);

    /// Mark the overlay visible without re-rendering.
    fn show(&mut self);

    /// Remove the visible marker. Called only while the overlay is shown.
    fn hide(&mut self);

    /// Remove the overlay from the container and release its resources.
    /// Called exactly once, at engine disposal.
    fn teardown(&mut self);
}

/// The engine's single piece of persistent mutable state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayState {
    visible: bool,
    current_id: Option<RequestId>,
    current_height: Option<f64>,
}

impl OverlayState {
    /// Whether the overlay is currently shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Id of the request whose preview is shown, if any.
    pub fn current_id(&self) -> Option<&RequestId> {
        self.current_id.as_ref()
    }

    /// Height last applied to the overlay, if a render has happened.
    pub fn current_height(&self) -> Option<f64> {
        self.current_height
    }

    pub(crate) fn record_render(&mut self, id: RequestId, height: f64) {
        self.visible = true;
        self.current_id = Some(id);
        self.current_height = Some(height);
    }

    pub(crate) fn mark_visible(&mut self) {
        self.visible = true;
    }

    /// True when a full re-render is required for `id` at `height`: either
    /// the overlay is hidden, or the visible id or height changed.
    pub(crate) fn needs_render(&self, id: &RequestId, height: f64) -> bool {
        !self.visible || self.current_id.as_ref() != Some(id) || self.current_height != Some(height)
    }

    pub(crate) fn clear_visible(&mut self) {
        self.visible = false;
        self.current_id = None;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
