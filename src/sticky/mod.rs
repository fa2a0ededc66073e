//! Sticky preview engine.
//!
//! Decides when a pinned preview of a tracked list row should be shown while
//! the list scrolls, and drives a host-owned overlay accordingly. One engine
//! instance per tracked list; everything runs synchronously on the caller's
//! event loop.
//!
//! The engine owns three things:
//! - the pure visibility predicate ([`geometry::should_show_sticky`]),
//! - a bounded FIFO cache of sanitized row clones ([`cache::CloneCache`]),
//! - the overlay's visible/hidden state ([`overlay::OverlayState`]).
//!
//! Geometry comes from caller-supplied query closures so the engine holds no
//! reference to the list itself. Queries must be cheap and side-effect-free;
//! they run on every scroll tick.

pub mod cache;
pub mod geometry;
pub mod overlay;

pub use cache::CloneCache;
pub use geometry::{should_show_sticky, ViewportGeometry, EDGE_TOLERANCE};
pub use overlay::{OverlayHost, OverlayState};

use crate::model::RequestId;
use tracing::trace;

/// Hard bound on cached row clones. On overflow the oldest inserted entry is
/// evicted, independent of access recency.
pub const MAX_CACHED_CLONES: usize = 6;

/// Most recent known position and size of the tracked row.
///
/// Supplied by the caller on each update. `source` carries a live handle to
/// the row's rendered form when one is available; the engine clones and
/// caches it so the preview survives the row leaving the render window.
#[derive(Debug, Clone)]
pub struct RowSnapshot<S> {
    /// Logical id of the request the row belongs to.
    pub id: RequestId,
    /// Top edge of the row in list coordinates.
    pub top: f64,
    /// Height of the row. Clamped to at least 1 by the engine.
    pub height: f64,
    /// Handle to the rendered row, when it is currently rendered.
    pub source: Option<S>,
}

/// Zero-argument geometry query into caller-owned state.
pub type GeometryQuery = Box<dyn Fn() -> f64>;

/// Optional per-tick snapshot provider.
pub type SnapshotProvider<S> = Box<dyn Fn() -> Option<RowSnapshot<S>>>;

/// Sticky preview engine driving a single overlay.
pub struct StickyEngine<H: OverlayHost> {
    host: H,
    scroll_top: GeometryQuery,
    viewport_height: GeometryQuery,
    snapshot_provider: Option<SnapshotProvider<H::Source>>,
    cache: CloneCache<H::Fragment>,
    state: OverlayState,
    disposed: bool,
}

impl<H: OverlayHost> StickyEngine<H> {
    /// Create an engine over `host`, reading geometry through the two query
    /// closures. `snapshot_provider` feeds [`update`](Self::update); callers
    /// that push snapshots themselves may pass `None` and use
    /// [`update_with`](Self::update_with).
    pub fn new(
        host: H,
        scroll_top: GeometryQuery,
        viewport_height: GeometryQuery,
        snapshot_provider: Option<SnapshotProvider<H::Source>>,
    ) -> Self {
        Self {
            host,
            scroll_top,
            viewport_height,
            snapshot_provider,
            cache: CloneCache::new(MAX_CACHED_CLONES),
            state: OverlayState::default(),
            disposed: false,
        }
    }

    /// Run one update tick, pulling the snapshot from the provider.
    ///
    /// Invoke on every scroll or layout event. Without a provider this hides
    /// the overlay, same as a provider returning `None`.
    pub fn update(&mut self) {
        if self.disposed {
            return;
        }
        let snapshot = self.snapshot_provider.as_ref().and_then(|provide| provide());
        self.update_with(snapshot);
    }

    /// Run one update tick against an explicit snapshot.
    pub fn update_with(&mut self, snapshot: Option<RowSnapshot<H::Source>>) {
        if self.disposed {
            return;
        }
        let Some(snapshot) = snapshot else {
            self.hide();
            return;
        };

        let height = snapshot.height.max(1.0);

        if let Some(source) = &snapshot.source {
            let fragment = self.host.prepare_clone(source);
            self.cache.insert(snapshot.id.clone(), fragment);
        }

        let fragment = match self.cache.get(&snapshot.id) {
            Some(fragment) => fragment.clone(),
            None => {
                // Snapshot arrived without a source and the id was never
                // cached (or was evicted): nothing to preview.
                self.hide();
                return;
            }
        };

        let geometry = ViewportGeometry::new((self.scroll_top)(), (self.viewport_height)());
        if !geometry.should_show(snapshot.top, height) {
            self.hide();
            return;
        }

        if self.state.needs_render(&snapshot.id, height) {
            trace!(id = %snapshot.id, height, "sticky preview re-render");
            self.host.render(&fragment, height);
            self.state.record_render(snapshot.id, height);
        } else {
            self.host.apply_height(height);
            self.host.show();
            self.state.mark_visible();
        }
    }

    /// Hide the overlay and forget the visible id.
    ///
    /// Idempotent: when already hidden, only the id is cleared.
    pub fn hide(&mut self) {
        if self.disposed {
            return;
        }
        if self.state.is_visible() {
            self.host.hide();
        }
        self.state.clear_visible();
    }

    /// Tear down the overlay and release the cache. Subsequent calls to any
    /// engine operation are no-ops. Idempotent; also runs on drop.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.host.teardown();
        self.cache.clear();
        self.state.reset();
    }

    /// Current overlay state (visible flag, shown id, applied height).
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    /// Ids currently held by the clone cache, oldest first.
    pub fn cached_ids(&self) -> impl Iterator<Item = &RequestId> {
        self.cache.ids()
    }

    /// The overlay host, for callers that need to read shared surfaces.
    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: OverlayHost> Drop for StickyEngine<H> {
    fn drop(&mut self) {
        self.dispose();
    }
}
