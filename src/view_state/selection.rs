//! Selection state and scroll-into-view
//!
//! [`SelectionState`] tracks selected and highlighted flows. When exactly one
//! flow becomes selected, [`SelectionFollower`] computes the minimal scroll
//! that brings its row fully into view below the table header.

use super::filter::OrderedView;
use super::types::{RowHeight, ViewportGeometry};
use crate::model::FlowId;
use std::collections::HashSet;

/// Minimal scroll needed to show row `selected_index` fully.
///
/// Uniform-height form of [`scroll_adjustment_for_row`]. Coordinates include
/// a header of `header_height` above the rows. Returns `None` when the row is
/// already fully visible.
pub fn compute_scroll_adjustment(
    selected_index: usize,
    row_height: RowHeight,
    header_height: u32,
    viewport: ViewportGeometry,
) -> Option<i64> {
    let row_top = (selected_index as u64).saturating_mul(u64::from(row_height.get()));
    scroll_adjustment_for_row(row_top, row_height.get(), header_height, viewport)
}

/// Minimal scroll needed to show a row spanning `row_top..row_top + row_height`
/// of the content (header excluded) fully below the header.
///
/// A row taller than the viewport is aligned to the viewport's bottom edge.
pub fn scroll_adjustment_for_row(
    row_top: u64,
    row_height: u32,
    header_height: u32,
    viewport: ViewportGeometry,
) -> Option<i64> {
    let header_height = i64::from(header_height);
    let row_top = i64::try_from(row_top).unwrap_or(i64::MAX);
    let row_bottom = row_top
        .saturating_add(header_height)
        .saturating_add(i64::from(row_height));

    if row_top < viewport.top {
        Some(row_top)
    } else if row_bottom > viewport.bottom() {
        Some(row_bottom - i64::from(viewport.height))
    } else {
        None
    }
}

/// Scrolls newly single-selected rows into view.
///
/// Remembers which single selection it last acted on, so repeated
/// notifications for the same selection never move the viewport again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionFollower {
    header_height: u32,
    followed: Option<FlowId>,
}

impl SelectionFollower {
    /// Follower for a table with a sticky header of `header_height`.
    pub fn new(header_height: u32) -> Self {
        Self {
            header_height,
            followed: None,
        }
    }

    /// Height of the sticky header above the rows.
    pub fn header_height(&self) -> u32 {
        self.header_height
    }

    /// React to a selection change.
    ///
    /// Returns the new viewport top when the single-selection invariant is
    /// newly satisfied by a row present in `view` and that row is not fully
    /// visible. A selection filtered out of the view is not followable.
    /// `row_span` maps a view index to the row's content offset and height.
    pub fn follow(
        &mut self,
        selection: &SelectionState,
        view: &OrderedView,
        viewport: ViewportGeometry,
        row_span: impl Fn(usize) -> (u64, u32),
    ) -> Option<i64> {
        let only = selection.only_selected().cloned();
        if only == self.followed {
            return None;
        }
        self.followed = only;

        let index = view.index_of(self.followed.as_ref()?)?;
        let (row_top, row_height) = row_span(index);
        scroll_adjustment_for_row(row_top, row_height, self.header_height, viewport)
    }
}

/// Selected and highlighted flows.
///
/// Highlighting is presentation-only; the windowing logic reads selection
/// alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Selection order; the last entry is the most recent.
    selected: Vec<FlowId>,
    highlighted: HashSet<FlowId>,
}

impl SelectionState {
    /// Nothing selected or highlighted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection.
    pub fn select(&mut self, ids: impl IntoIterator<Item = FlowId>) {
        self.selected.clear();
        for id in ids {
            if !self.selected.contains(&id) {
                self.selected.push(id);
            }
        }
    }

    /// Deselect everything; highlighting is kept.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Whether `id` is selected.
    pub fn is_selected(&self, id: &FlowId) -> bool {
        self.selected.contains(id)
    }

    /// Selected ids, oldest first.
    pub fn selected(&self) -> &[FlowId] {
        &self.selected
    }

    /// The selected flow, if exactly one is selected.
    pub fn only_selected(&self) -> Option<&FlowId> {
        match self.selected.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Most recently selected flow.
    pub fn last_selected(&self) -> Option<&FlowId> {
        self.selected.last()
    }

    /// Replace the highlighted set.
    pub fn set_highlighted(&mut self, ids: impl IntoIterator<Item = FlowId>) {
        self.highlighted = ids.into_iter().collect();
    }

    /// Whether `id` is highlighted.
    pub fn is_highlighted(&self, id: &FlowId) -> bool {
        self.highlighted.contains(id)
    }

    /// Drop selected and highlighted ids the store no longer holds.
    pub fn retain(&mut self, mut exists: impl FnMut(&FlowId) -> bool) {
        self.selected.retain(&mut exists);
        self.highlighted.retain(|id| exists(id));
    }

    /// Select the flow `shift` rows away from the most recent selection.
    ///
    /// Without a selection in the view, a negative shift selects the first
    /// row and any other shift the last. The target index is clamped into the
    /// view; an empty view clears the selection.
    pub fn select_relative(&mut self, view: &OrderedView, shift: isize) {
        if view.is_empty() {
            self.clear();
            return;
        }
        let last = view.len() - 1;
        let current = self.last_selected().and_then(|id| view.index_of(id));

        let target = match current {
            None if shift < 0 => 0,
            None => last,
            Some(index) => index.saturating_add_signed(shift).min(last),
        };

        match view.id_at(target) {
            Some(id) => self.select([id.clone()]),
            None => self.clear(),
        }
    }
}
