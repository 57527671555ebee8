//! WindowController - reconciles data, filter, selection and geometry
//!
//! Owns the ordered view and the committed window for one table. Every
//! event handler runs the same pipeline synchronously. The controller is
//! idle between calls and recomputing only inside a `&mut self` handler, so
//! a recomputation can never observe or re-enter another one:
//!
//! ```text
//! Idle → Recomputing → Idle
//!   filter (if the data or spec changed)
//!   → bottom anchor capture / restore (if content grew)
//!   → selection follow (if selection changed)
//!   → window calculation
//!   → commit, only when the window or viewport top actually changed
//! ```
//!
//! Scroll offsets the controller decides on (anchor restores, selection
//! follows, clamping after shrink) are queued for the host container via
//! [`WindowController::take_scroll_request`]. They are computed against the
//! content height of the already-updated view, so the host must apply them
//! after laying out the new row count.
//!
//! The scroll container holds a sticky header of `header_height` followed by
//! the rows, so its scroll extent is `header_height + content_height`.

use super::filter::{FilterSpec, OrderedView};
use super::height_index::HeightIndex;
use super::row_metrics::RowMetrics;
use super::scroll_anchor::{is_at_bottom, BottomAnchor, ScrollAnchor, DEFAULT_BOTTOM_EPSILON};
use super::selection::{SelectionFollower, SelectionState};
use super::types::{clamp_scroll_top, RowHeight, ViewportGeometry};
use super::window::{WindowCalculator, WindowState, DEFAULT_OVERSCAN};
use crate::model::{FlowId, Record};
use std::collections::HashSet;
use tracing::debug;

/// Construction-time settings for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSettings {
    /// Uniform row height.
    pub row_height: RowHeight,
    /// Height of the sticky header above the rows.
    pub header_height: u32,
    /// Extra rows materialized on each side of the viewport.
    pub overscan: usize,
    /// Tolerance for counting the viewport as at the bottom.
    pub bottom_epsilon: u32,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            row_height: RowHeight::ONE,
            header_height: 0,
            overscan: DEFAULT_OVERSCAN,
            bottom_epsilon: DEFAULT_BOTTOM_EPSILON,
        }
    }
}

/// What caused a recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The host scrolled.
    Scroll,
    /// The host container was measured or resized.
    Resize,
    /// The record store changed.
    DataChanged,
    /// The filter was replaced.
    FilterChanged,
    /// The selection was replaced or moved.
    SelectionChanged,
    /// Per-row height overrides were replaced.
    MetricsChanged,
}

/// State consumed by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowSnapshot {
    /// Materialized rows.
    pub window: WindowState,
    /// Committed scroll offset.
    pub viewport_top: i64,
}

/// Orchestrates filtering, anchoring, selection follow and windowing.
#[derive(Debug, Clone)]
pub struct WindowController {
    calculator: WindowCalculator,
    metrics: RowMetrics,
    heights: Option<HeightIndex>,
    anchor: ScrollAnchor,
    follower: SelectionFollower,
    filter: FilterSpec,
    view: OrderedView,
    selection: SelectionState,
    viewport: Option<ViewportGeometry>,
    committed: WindowSnapshot,
    pending_scroll: Option<i64>,
    commits: u64,
}

impl WindowController {
    /// Unmeasured controller with an empty view.
    pub fn new(settings: TableSettings) -> Self {
        Self {
            calculator: WindowCalculator::new(settings.row_height)
                .with_overscan(settings.overscan),
            metrics: RowMetrics::uniform(settings.row_height),
            heights: None,
            anchor: ScrollAnchor::new(settings.bottom_epsilon),
            follower: SelectionFollower::new(settings.header_height),
            filter: FilterSpec::default(),
            view: OrderedView::default(),
            selection: SelectionState::default(),
            viewport: None,
            committed: WindowSnapshot::default(),
            pending_scroll: None,
            commits: 0,
        }
    }

    // ===== Event handlers =====

    /// The host scrolled.
    pub fn on_scroll(&mut self, top: i64) -> bool {
        let height = self.viewport.map_or(0, |v| v.height);
        self.viewport = Some(ViewportGeometry::new(top, height));
        self.recompute(Trigger::Scroll, None)
    }

    /// Scroll relative to the current offset.
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        let top = self.viewport_top().saturating_add(delta);
        self.pending_scroll = Some(top);
        self.on_scroll(top)
    }

    /// The host container was measured or resized.
    pub fn on_resize(&mut self, height: u32) -> bool {
        let top = self.viewport.map_or(0, |v| v.top);
        self.viewport = Some(ViewportGeometry::new(top, height));
        self.recompute(Trigger::Resize, None)
    }

    /// The record store changed; `records` is the full, current sequence.
    pub fn on_data_changed<R: Record>(&mut self, records: &[R]) -> bool {
        let live: HashSet<&FlowId> = records.iter().map(|r| r.id()).collect();
        self.selection.retain(|id| live.contains(id));

        let anchor = self.capture_anchor();
        self.view = OrderedView::derive(records, &self.filter);
        self.rebuild_heights();
        let restored = self.restore_anchor(anchor);
        self.recompute(Trigger::DataChanged, restored)
    }

    /// Replace the filter.
    pub fn set_filter<R: Record>(&mut self, filter: FilterSpec, records: &[R]) -> bool {
        if filter == self.filter {
            return false;
        }
        debug!(?filter, "Filter changed");
        let anchor = self.capture_anchor();
        self.filter = filter;
        self.view = OrderedView::derive(records, &self.filter);
        self.rebuild_heights();
        let restored = self.restore_anchor(anchor);
        self.recompute(Trigger::FilterChanged, restored)
    }

    /// Replace the selection.
    pub fn set_selection(&mut self, selection: SelectionState) -> bool {
        self.selection = selection;
        self.selection_changed()
    }

    /// Move the selection by `shift` rows within the view.
    pub fn select_relative(&mut self, shift: isize) -> bool {
        self.selection.select_relative(&self.view, shift);
        self.selection_changed()
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) -> bool {
        self.selection.clear();
        self.selection_changed()
    }

    /// Replace the per-index height overrides.
    pub fn set_height_overrides(&mut self, overrides: Vec<u32>) -> bool {
        let anchor = self.capture_anchor();
        self.metrics = RowMetrics::with_overrides(self.metrics.row_height(), overrides);
        self.rebuild_heights();
        let restored = self.restore_anchor(anchor);
        self.recompute(Trigger::MetricsChanged, restored)
    }

    // ===== Derived state =====

    /// Committed window.
    pub fn window(&self) -> WindowState {
        self.committed.window
    }

    /// Committed window and scroll offset.
    pub fn snapshot(&self) -> WindowSnapshot {
        self.committed
    }

    /// Current viewport; `None` until the host is measured.
    pub fn viewport(&self) -> Option<ViewportGeometry> {
        self.viewport
    }

    /// Current scroll offset, 0 when unmeasured.
    pub fn viewport_top(&self) -> i64 {
        self.viewport.map_or(0, |v| v.top)
    }

    /// Filtered rows in display order.
    pub fn view(&self) -> &OrderedView {
        &self.view
    }

    /// Active filter.
    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    /// Current selection.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Mutable access for presentation-only changes (highlighting).
    ///
    /// Selection changes made here are not followed; use
    /// [`WindowController::set_selection`] for those.
    pub fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    /// Uniform row height.
    pub fn row_height(&self) -> RowHeight {
        self.calculator.row_height()
    }

    /// Height of the sticky header.
    pub fn header_height(&self) -> u32 {
        self.follower.header_height()
    }

    /// Number of commits since construction.
    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    /// Total height of all rows in the view.
    pub fn content_height(&self) -> u64 {
        match &self.heights {
            Some(index) => index.total(),
            None => self.metrics.content_height(self.view.len()),
        }
    }

    /// Height of the scroll container's content: header plus rows.
    pub fn scroll_extent(&self) -> u64 {
        u64::from(self.header_height()) + self.content_height()
    }

    /// Whether the viewport currently sits at the bottom of the content.
    ///
    /// An unmeasured table counts as at the bottom.
    pub fn is_at_bottom(&self) -> bool {
        self.viewport.map_or(true, |viewport| {
            is_at_bottom(viewport, self.scroll_extent(), self.anchor.epsilon())
        })
    }

    /// View row covering a content offset (header excluded).
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        match &self.heights {
            Some(heights) => heights.lower_bound(offset),
            None => {
                let index = offset / u64::from(self.metrics.row_height().get());
                usize::try_from(index)
                    .ok()
                    .filter(|&index| index < self.view.len())
            }
        }
    }

    /// Offset of the top edge of a view row.
    pub fn row_offset(&self, index: usize) -> u64 {
        row_span(self.heights.as_ref(), &self.metrics, index).0
    }

    /// Height of a view row.
    pub fn row_height_of(&self, index: usize) -> u32 {
        self.metrics.height_of(index)
    }

    /// Store records materialized by the committed window, with view indices.
    pub fn visible_records<'a, R>(
        &'a self,
        records: &'a [R],
    ) -> impl Iterator<Item = (usize, &'a R)> + 'a {
        self.view.records(records, self.committed.window.indices())
    }

    /// Scroll offset the host container should apply, if any.
    pub fn take_scroll_request(&mut self) -> Option<i64> {
        self.pending_scroll.take()
    }

    // ===== Pipeline =====

    fn capture_anchor(&self) -> Option<(BottomAnchor, u64)> {
        let before = self.scroll_extent();
        self.anchor
            .capture(self.viewport, before)
            .map(|anchor| (anchor, before))
    }

    fn restore_anchor(&self, captured: Option<(BottomAnchor, u64)>) -> Option<i64> {
        let (anchor, before) = captured?;
        let after = self.scroll_extent();
        if after <= before {
            return None;
        }
        let top = anchor.restore(self.viewport, after)?;
        debug!(before, after, top, "Re-anchored to bottom");
        Some(top)
    }

    fn selection_changed(&mut self) -> bool {
        let heights = self.heights.as_ref();
        let metrics = &self.metrics;
        let follow = self.viewport.and_then(|viewport| {
            self.follower
                .follow(&self.selection, &self.view, viewport, |index| {
                    row_span(heights, metrics, index)
                })
        });
        if let Some(top) = follow {
            debug!(top, "Scrolling selection into view");
        }
        self.recompute(Trigger::SelectionChanged, follow)
    }

    fn rebuild_heights(&mut self) {
        self.heights = self.metrics.height_index(self.view.len());
    }

    fn recompute(&mut self, trigger: Trigger, forced_top: Option<i64>) -> bool {
        let snapshot = match self.viewport {
            Some(viewport) => {
                let requested = forced_top.unwrap_or(viewport.top);
                let top = clamp_scroll_top(requested, self.scroll_extent(), viewport.height);
                if forced_top.is_some() || top != viewport.top {
                    self.pending_scroll = Some(top);
                }
                let viewport = viewport.with_top(top);
                self.viewport = Some(viewport);

                WindowSnapshot {
                    window: self
                        .calculator
                        .compute(self.view.len(), viewport, self.heights.as_ref()),
                    viewport_top: top,
                }
            }
            // Not measured yet: nothing is materialized.
            None => WindowSnapshot::default(),
        };

        let changed = snapshot != self.committed;
        if changed {
            self.committed = snapshot;
            self.commits += 1;
            debug!(
                ?trigger,
                start = snapshot.window.start,
                end = snapshot.window.end,
                top = snapshot.viewport_top,
                items = self.view.len(),
                "Committed window"
            );
        }

        changed
    }
}

/// Content offset and height of a view row.
fn row_span(heights: Option<&HeightIndex>, metrics: &RowMetrics, index: usize) -> (u64, u32) {
    match heights {
        Some(heights) => (
            heights.offset_of(index.min(heights.len())),
            metrics.height_of(index),
        ),
        None => (
            index as u64 * u64::from(metrics.row_height().get()),
            metrics.row_height().get(),
        ),
    }
}
