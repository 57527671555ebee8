//! Visible window calculation
//!
//! Maps (item count, row heights, viewport geometry) to the contiguous index
//! range that must be materialized, plus the spacer heights above and below
//! it. Pure and deterministic; cheap enough to call every frame.
//!
//! Two paths exist and deliberately keep their own boundary rules:
//! - uniform rows: closed form with overscan on both sides
//! - measured rows: cumulative-offset search over a [`HeightIndex`], no
//!   overscan, with a single overshoot correction when the list is shorter
//!   than the requested scroll position

use super::height_index::HeightIndex;
use super::types::{clamp_scroll_top, RowHeight, ViewportGeometry};
use tracing::{trace, warn};

/// Extra rows rendered on each side of the visible range.
pub const DEFAULT_OVERSCAN: usize = 1;

/// Window starts are aligned to a multiple of this, so alternating-row
/// striping does not flip as the window shifts.
pub const STRIPE_PERIOD: usize = 2;

/// Upper bound on overshoot correction passes in the measured path.
pub const MAX_OVERSHOOT_CORRECTIONS: usize = 1;

/// Round a row index down to the start of its stripe period.
pub fn align_to_stripe(index: usize) -> usize {
    index - index % STRIPE_PERIOD
}

/// Range of rows materialized for the current viewport.
///
/// # Invariants
/// - `start <= end <= item_count`
/// - uniform rows: `padding_top + (end - start) * row_height + padding_bottom
///   == item_count * row_height`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowState {
    /// Index of the first materialized row (inclusive).
    pub start: usize,
    /// Index past the last materialized row (exclusive).
    pub end: usize,
    /// Height of the spacer above the first materialized row.
    pub padding_top: u64,
    /// Height of the spacer below the last materialized row.
    pub padding_bottom: u64,
}

impl WindowState {
    /// The zero-size window.
    pub const EMPTY: Self = Self {
        start: 0,
        end: 0,
        padding_top: 0,
        padding_bottom: 0,
    };

    /// Number of materialized rows.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when no row is materialized.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if a specific row index is materialized.
    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }

    /// Iterate over materialized row indices.
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Window calculator for one table instance.
///
/// Holds the validated row height and overscan so per-frame calls only pass
/// what changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCalculator {
    row_height: RowHeight,
    overscan: usize,
}

impl WindowCalculator {
    /// Calculator with the default overscan.
    pub fn new(row_height: RowHeight) -> Self {
        Self {
            row_height,
            overscan: DEFAULT_OVERSCAN,
        }
    }

    /// Replace the overscan row count.
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// The uniform row height.
    pub fn row_height(&self) -> RowHeight {
        self.row_height
    }

    /// Overscan rows per side.
    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Compute the window for `item_count` rows.
    ///
    /// `heights` selects the measured path; it must describe exactly
    /// `item_count` rows, otherwise it is ignored and the uniform path is used.
    pub fn compute(
        &self,
        item_count: usize,
        viewport: ViewportGeometry,
        heights: Option<&HeightIndex>,
    ) -> WindowState {
        if item_count == 0 {
            return WindowState::EMPTY;
        }

        let heights = match heights {
            Some(index) if index.len() == item_count => Some(index),
            Some(index) => {
                warn!(
                    item_count,
                    measured = index.len(),
                    "Height index does not match item count, using uniform rows"
                );
                None
            }
            None => None,
        };

        let window = if viewport.height == 0 {
            self.compute_collapsed(item_count, viewport, heights)
        } else if let Some(index) = heights {
            self.compute_measured(index, viewport)
        } else {
            self.compute_uniform(item_count, viewport)
        };

        trace!(
            item_count,
            top = viewport.top,
            height = viewport.height,
            start = window.start,
            end = window.end,
            "Computed window"
        );
        window
    }

    fn compute_uniform(&self, item_count: usize, viewport: ViewportGeometry) -> WindowState {
        let row_height = u64::from(self.row_height.get());
        let content_height = item_count as u64 * row_height;
        let top = clamp_scroll_top(viewport.top, content_height, viewport.height) as u64;

        let first_visible = (top / row_height) as usize;
        let start = align_to_stripe(first_visible.saturating_sub(self.overscan));
        let visible_rows = u64::from(viewport.height).div_ceil(row_height) as usize;
        let end = item_count.min(
            start
                .saturating_add(visible_rows)
                .saturating_add(self.overscan.saturating_mul(2)),
        );

        WindowState {
            start,
            end,
            padding_top: start as u64 * row_height,
            padding_bottom: (item_count - end) as u64 * row_height,
        }
    }

    fn compute_measured(&self, heights: &HeightIndex, viewport: ViewportGeometry) -> WindowState {
        let mut top = viewport.top;

        for _ in 0..MAX_OVERSHOOT_CORRECTIONS {
            let total = i64::try_from(heights.total()).unwrap_or(i64::MAX);
            let bottom = top.saturating_add(i64::from(viewport.height));
            if top > 0 && total < bottom {
                // List is shorter than the requested position, e.g. right
                // after rows were removed.
                top = (total - i64::from(viewport.height)).max(0);
            } else {
                break;
            }
        }

        measured_window(heights, top, viewport.height)
    }

    /// A zero-height viewport materializes nothing, at the clamped top.
    fn compute_collapsed(
        &self,
        item_count: usize,
        viewport: ViewportGeometry,
        heights: Option<&HeightIndex>,
    ) -> WindowState {
        let content_height = match heights {
            Some(index) => index.total(),
            None => item_count as u64 * u64::from(self.row_height.get()),
        };
        let top = clamp_scroll_top(viewport.top, content_height, 0) as u64;

        let (index, offset) = match heights {
            Some(index) => {
                let row = index.lower_bound(top).unwrap_or(item_count);
                (row, index.offset_of(row))
            }
            None => {
                let row_height = u64::from(self.row_height.get());
                let row = ((top / row_height) as usize).min(item_count);
                (row, row as u64 * row_height)
            }
        };

        WindowState {
            start: index,
            end: index,
            padding_top: offset,
            padding_bottom: content_height - offset,
        }
    }
}

/// Measured-path window for a viewport at `top`.
///
/// A negative `top` starts the window at row 0 while the end scan still
/// stops at `top + viewport_height`.
fn measured_window(heights: &HeightIndex, top: i64, viewport_height: u32) -> WindowState {
    let item_count = heights.len();
    let bottom = top.saturating_add(i64::from(viewport_height));
    let top = u64::try_from(top).unwrap_or(0);

    // Last row whose top edge is at or above `top`.
    let containing_top = heights.lower_bound(top).unwrap_or(item_count - 1);
    let start = align_to_stripe(containing_top);

    // Rows whose top edge is at or above `bottom` are materialized.
    let end = match u64::try_from(bottom) {
        Ok(bottom) => heights
            .lower_bound(bottom)
            .map_or(item_count, |row| row + 1),
        Err(_) => start,
    };

    let padding_top = heights.offset_of(start);
    let padding_bottom = heights.total() - heights.offset_of(end);

    WindowState {
        start,
        end,
        padding_top,
        padding_bottom,
    }
}

/// Compute the window with default overscan.
///
/// Convenience wrapper over [`WindowCalculator::compute`].
pub fn compute_window(
    item_count: usize,
    row_height: RowHeight,
    viewport: ViewportGeometry,
    heights: Option<&HeightIndex>,
) -> WindowState {
    WindowCalculator::new(row_height).compute(item_count, viewport, heights)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rh(h: u32) -> RowHeight {
        RowHeight::new(h).unwrap()
    }

    fn uniform(item_count: usize, row_height: u32, top: i64, height: u32) -> WindowState {
        compute_window(
            item_count,
            rh(row_height),
            ViewportGeometry::new(top, height),
            None,
        )
    }

    mod window_state {
        use super::*;

        #[test]
        fn default_is_empty() {
            assert_eq!(WindowState::default(), WindowState::EMPTY);
            assert!(WindowState::EMPTY.is_empty());
        }

        #[test]
        fn contains_is_half_open() {
            let window = WindowState {
                start: 4,
                end: 8,
                padding_top: 0,
                padding_bottom: 0,
            };
            assert!(window.contains(4));
            assert!(window.contains(7));
            assert!(!window.contains(8));
            assert!(!window.contains(3));
            assert_eq!(window.len(), 4);
            assert_eq!(window.indices().count(), 4);
        }
    }

    mod stripe {
        use super::*;

        #[test]
        fn align_rounds_down_to_even() {
            assert_eq!(align_to_stripe(0), 0);
            assert_eq!(align_to_stripe(1), 0);
            assert_eq!(align_to_stripe(7), 6);
            assert_eq!(align_to_stripe(10), 10);
        }
    }

    mod uniform_path {
        use super::*;

        #[test]
        fn empty_list_yields_zero_window() {
            assert_eq!(uniform(0, 32, 500, 320), WindowState::EMPTY);
        }

        #[test]
        fn top_of_long_list_materializes_viewport_plus_overscan() {
            let window = uniform(1000, 32, 0, 320);
            assert_eq!(window.start, 0);
            assert_eq!(window.end, 12);
            assert_eq!(window.padding_top, 0);
            assert_eq!(window.padding_bottom, 988 * 32);
        }

        #[test]
        fn near_end_reaches_last_row() {
            let window = uniform(1000, 32, 31_968, 320);
            assert_eq!(window.end, 1000);
            assert_eq!(window.padding_bottom, 0);
        }

        #[test]
        fn excessive_top_is_clamped_to_last_page() {
            assert_eq!(uniform(1000, 32, 10_000_000, 320), uniform(1000, 32, 31_680, 320));
        }

        #[test]
        fn negative_top_is_clamped_to_zero() {
            assert_eq!(uniform(1000, 32, -400, 320), uniform(1000, 32, 0, 320));
        }

        #[test]
        fn start_is_overscanned_and_even() {
            // first visible row is 10, minus one overscan row = 9, aligned = 8
            let window = uniform(1000, 32, 320, 320);
            assert_eq!(window.start, 8);
            assert_eq!(window.end, 20);
            assert_eq!(window.padding_top, 8 * 32);
        }

        #[test]
        fn partial_rows_round_up_visible_count() {
            let window = uniform(1000, 10, 0, 25);
            assert_eq!(window.end, 5); // ceil(25 / 10) + 2
        }

        #[test]
        fn short_list_fits_entirely() {
            let window = uniform(3, 32, 0, 320);
            assert_eq!(window, WindowState {
                start: 0,
                end: 3,
                padding_top: 0,
                padding_bottom: 0,
            });
        }

        #[test]
        fn custom_overscan_widens_window() {
            let calculator = WindowCalculator::new(rh(32)).with_overscan(3);
            let window = calculator.compute(1000, ViewportGeometry::new(3200, 320), None);
            assert_eq!(window.start, 96); // 100 - 3 = 97, aligned
            assert_eq!(window.end, 96 + 10 + 6);
        }

        #[test]
        fn huge_overscan_saturates_to_whole_list() {
            let calculator = WindowCalculator::new(rh(32)).with_overscan(usize::MAX);
            let window = calculator.compute(1000, ViewportGeometry::new(3200, 320), None);
            assert_eq!(window.start, 0);
            assert_eq!(window.end, 1000);
            assert_eq!(window.padding_top + window.padding_bottom, 0);
        }

        #[test]
        fn zero_overscan_still_aligns() {
            let calculator = WindowCalculator::new(rh(32)).with_overscan(0);
            let window = calculator.compute(1000, ViewportGeometry::new(32 * 5, 320), None);
            assert_eq!(window.start, 4);
            assert_eq!(window.end, 14);
        }

        #[test]
        fn zero_height_viewport_is_empty_at_clamped_top() {
            let window = uniform(1000, 32, 640, 0);
            assert_eq!(window.start, 20);
            assert_eq!(window.end, 20);
            assert_eq!(window.padding_top + window.padding_bottom, 32_000);
        }

        #[test]
        fn zero_height_viewport_past_end_clamps_to_item_count() {
            let window = uniform(10, 32, 99_999, 0);
            assert_eq!((window.start, window.end), (10, 10));
            assert_eq!(window.padding_bottom, 0);
        }
    }

    mod measured_path {
        use super::*;

        fn measured(heights: &[u32], top: i64, height: u32) -> WindowState {
            let index = HeightIndex::from_heights(heights.iter().copied());
            compute_window(
                heights.len(),
                rh(10),
                ViewportGeometry::new(top, height),
                Some(&index),
            )
        }

        #[test]
        fn top_of_list() {
            // offsets: 0, 10, 30, 60, 70, 80
            let window = measured(&[10, 20, 30, 10, 10, 10], 0, 25);
            assert_eq!(window.start, 0);
            assert_eq!(window.end, 2); // rows at 0 and 10 start within [0, 25]
            assert_eq!(window.padding_top, 0);
            assert_eq!(window.padding_bottom, 60);
        }

        #[test]
        fn start_aligns_to_even_row() {
            // top = 35 lies in row 2 (30..60); row 2 is even
            let window = measured(&[10, 20, 30, 10, 10, 10], 35, 10);
            assert_eq!(window.start, 2);
            assert_eq!(window.padding_top, 30);

            // top = 62 lies in row 3 (60..70); aligned back to row 2
            let window = measured(&[10, 20, 30, 10, 10, 10], 62, 10);
            assert_eq!(window.start, 2);
            assert_eq!(window.padding_top, 30);
        }

        #[test]
        fn negative_top_keeps_its_bottom_edge() {
            // bottom = -5 + 12 = 7 lies in row 0; at top 0 it would reach row 1
            let window = measured(&[10, 20, 30, 10, 10, 10], -5, 12);
            assert_eq!(window.start, 0);
            assert_eq!(window.end, 1);
            assert_eq!(measured(&[10, 20, 30, 10, 10, 10], 0, 12).end, 2);
        }

        #[test]
        fn viewport_entirely_above_content_materializes_nothing() {
            let window = measured(&[10, 20, 30], -100, 25);
            assert!(window.is_empty());
            assert_eq!(window.padding_top + window.padding_bottom, 60);
        }

        #[test]
        fn row_starting_exactly_at_bottom_is_included() {
            // bottom = 30 is exactly the top of row 2
            let window = measured(&[10, 20, 30, 10], 0, 30);
            assert_eq!(window.end, 3);
        }

        #[test]
        fn overshoot_is_corrected_once() {
            // total = 90; asking for top 500 re-runs at 90 - 20 = 70
            let window = measured(&[10, 20, 30, 10, 10, 10], 500, 20);
            assert_eq!(window, measured(&[10, 20, 30, 10, 10, 10], 70, 20));
            assert_eq!(window.end, 6);
        }

        #[test]
        fn overshoot_with_viewport_taller_than_list_shows_everything() {
            let window = measured(&[10, 20, 30], 40, 500);
            assert_eq!(window.start, 0);
            assert_eq!(window.end, 3);
            assert_eq!(window.padding_top + window.padding_bottom, 0);
        }

        #[test]
        fn heights_conserved() {
            let heights = [12, 7, 30, 1, 1, 50, 8, 9];
            let total: u64 = heights.iter().map(|&h| u64::from(h)).sum();
            for top in [0, 5, 19, 40, 70, 100, 117] {
                let window = measured(&heights, top, 15);
                let materialized: u64 = heights[window.start..window.end]
                    .iter()
                    .map(|&h| u64::from(h))
                    .sum();
                assert_eq!(window.padding_top + materialized + window.padding_bottom, total);
            }
        }

        #[test]
        fn mismatched_index_falls_back_to_uniform() {
            let index = HeightIndex::from_heights([50, 50]);
            let window = compute_window(100, rh(10), ViewportGeometry::new(0, 100), Some(&index));
            assert_eq!(window, uniform(100, 10, 0, 100));
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let a = uniform(5000, 17, 12_345, 480);
        let b = uniform(5000, 17, 12_345, 480);
        assert_eq!(a, b);
    }
}
