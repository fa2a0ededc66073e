//! Sticky visibility predicate.
//!
//! Pure geometry: given the tracked row's position and the current scroll
//! viewport, decide whether the pinned preview should be shown. Total over
//! real-number inputs; negative or zero geometry produces a definite answer
//! through the arithmetic rather than an error.

/// Slack, in coordinate units, allowed before a tall row's protruding edge
/// counts as "outside" the viewport.
pub const EDGE_TOLERANCE: f64 = 4.0;

/// Current scroll viewport, recomputed by the caller on every tick.
///
/// The engine never owns this; it is a transient bundle of the two geometry
/// queries for callers that prefer passing a struct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    /// Scroll offset from the top of the content, in list coordinates.
    pub scroll_top: f64,
    /// Height of the visible area, in the same coordinates.
    pub viewport_height: f64,
}

impl ViewportGeometry {
    /// Bundle a scroll offset and viewport height.
    pub fn new(scroll_top: f64, viewport_height: f64) -> Self {
        Self {
            scroll_top,
            viewport_height,
        }
    }

    /// Viewport-aware form of [`should_show_sticky`].
    pub fn should_show(&self, row_top: f64, row_height: f64) -> bool {
        should_show_sticky(
            row_top,
            row_height,
            self.scroll_top,
            Some(self.viewport_height),
        )
    }
}

/// Decide whether the sticky preview of the tracked row should be shown.
///
/// Two modes, matching the caller's knowledge of the viewport:
///
/// - Legacy (`viewport_height` = `None`): show once the row has scrolled
///   entirely above the visible area, i.e. `row_top + row_height <=
///   scroll_top`. Boundary equality counts as scrolled out.
/// - Viewport-aware: show when the row is entirely above or entirely below
///   the viewport. A row taller than the viewport can never be fully
///   visible, so for those the preview also shows when either edge sticks
///   out past the viewport bound by more than [`EDGE_TOLERANCE`]. A row
///   exactly as tall as the viewport never takes the tall-row branch.
///
/// Returns `false` when the row is adequately visible and no preview is
/// needed.
pub fn should_show_sticky(
    row_top: f64,
    row_height: f64,
    scroll_top: f64,
    viewport_height: Option<f64>,
) -> bool {
    let row_bottom = row_top + row_height;
    let viewport_top = scroll_top;

    let Some(viewport_height) = viewport_height else {
        return row_bottom <= viewport_top;
    };

    let viewport_bottom = viewport_top + viewport_height;
    let fully_above = row_bottom <= viewport_top;
    let fully_below = row_top >= viewport_bottom;
    if fully_above || fully_below {
        return true;
    }

    if row_height > viewport_height {
        let top_outside = row_top < viewport_top - EDGE_TOLERANCE;
        let bottom_outside = row_bottom > viewport_bottom + EDGE_TOLERANCE;
        return top_outside || bottom_outside;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    mod legacy_mode {
        use super::*;

        #[test]
        fn row_fully_visible_at_top_is_not_sticky() {
            // bottom = 300 > scroll_top = 200
            assert!(!should_show_sticky(200.0, 100.0, 200.0, None));
        }

        #[test]
        fn row_partially_scrolled_past_top_still_hides() {
            // scroll_top 205, bottom 300: not fully gone yet
            assert!(!should_show_sticky(200.0, 100.0, 205.0, None));
        }

        #[test]
        fn row_fully_scrolled_out_above_is_sticky() {
            // bottom 300 <= scroll_top 301
            assert!(should_show_sticky(200.0, 100.0, 301.0, None));
        }

        #[test]
        fn boundary_equality_counts_as_scrolled_out() {
            assert!(should_show_sticky(200.0, 100.0, 300.0, None));
        }

        #[test]
        fn large_row_must_scroll_fully_out() {
            // bottom 400 > 399: still visible
            assert!(!should_show_sticky(0.0, 400.0, 399.0, None));
            // bottom == scroll_top: gone
            assert!(should_show_sticky(0.0, 400.0, 400.0, None));
        }

        #[test]
        fn negative_geometry_is_total() {
            assert!(should_show_sticky(-100.0, 50.0, 0.0, None));
            assert!(!should_show_sticky(-10.0, 50.0, 0.0, None));
        }
    }

    mod viewport_aware {
        use super::*;

        #[test]
        fn row_inside_viewport_is_not_sticky() {
            assert!(!should_show_sticky(100.0, 50.0, 80.0, Some(200.0)));
        }

        #[test]
        fn row_fully_above_viewport_is_sticky() {
            assert!(should_show_sticky(0.0, 50.0, 50.0, Some(200.0)));
        }

        #[test]
        fn row_fully_below_viewport_is_sticky() {
            // viewport covers [100, 300); row starts at 300
            assert!(should_show_sticky(300.0, 50.0, 100.0, Some(200.0)));
        }

        #[test]
        fn row_straddling_top_edge_is_not_sticky_when_it_fits() {
            // height 50 <= viewport 200, partially visible
            assert!(!should_show_sticky(90.0, 50.0, 100.0, Some(200.0)));
        }

        #[test]
        fn row_straddling_bottom_edge_is_not_sticky_when_it_fits() {
            assert!(!should_show_sticky(280.0, 50.0, 100.0, Some(200.0)));
        }

        #[test]
        fn row_as_tall_as_viewport_never_takes_tall_branch() {
            // height == viewport: edges protruding is irrelevant
            assert!(!should_show_sticky(-50.0, 300.0, 0.0, Some(300.0)));
        }
    }

    mod tall_rows {
        use super::*;

        #[test]
        fn edges_within_tolerance_stay_hidden() {
            // row [0, 400), viewport [0, 300): bottom protrudes 100 > 4
            // but anchor the top inside tolerance first
            assert!(!should_show_sticky(-4.0, 304.0, 0.0, Some(300.0)));
        }

        #[test]
        fn top_edge_beyond_tolerance_shows() {
            assert!(should_show_sticky(-5.0, 400.0, 0.0, Some(300.0)));
        }

        #[test]
        fn bottom_edge_beyond_tolerance_shows() {
            // row [0, 400), viewport [0, 300): bottom 400 > 304
            assert!(should_show_sticky(0.0, 400.0, 0.0, Some(300.0)));
        }

        #[test]
        fn scrolling_a_tall_row_pins_until_centered_within_tolerance() {
            // row [0, 400), viewport height 300
            // scrolled so viewport is [96, 396): top protrudes 96 > 4
            assert!(should_show_sticky(0.0, 400.0, 96.0, Some(300.0)));
            // viewport [98, 398): top protrudes 98, bottom 400 > 402? no;
            // top protrusion alone keeps it pinned
            assert!(should_show_sticky(0.0, 400.0, 98.0, Some(300.0)));
        }

        #[test]
        fn tall_row_hides_only_when_both_edges_hug_the_viewport() {
            // row [96, 401), viewport [98, 398): top protrudes 2,
            // bottom protrudes 3, both within tolerance
            assert!(!should_show_sticky(96.0, 305.0, 98.0, Some(300.0)));
        }
    }

    mod viewport_geometry {
        use super::*;

        #[test]
        fn struct_form_matches_free_function() {
            let geometry = ViewportGeometry::new(100.0, 200.0);
            for (top, height) in [(0.0, 50.0), (150.0, 60.0), (0.0, 400.0)] {
                assert_eq!(
                    geometry.should_show(top, height),
                    should_show_sticky(top, height, 100.0, Some(200.0)),
                );
            }
        }
    }
}
