//! Row height configuration for a table instance

use super::height_index::HeightIndex;
use super::types::RowHeight;

/// Uniform row height plus an optional per-index override table.
///
/// Overrides are indexed by position in the ordered view. A missing entry or
/// an entry of `0` falls back to the uniform height.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowMetrics {
    row_height: RowHeight,
    overrides: Vec<u32>,
}

impl RowMetrics {
    /// Metrics where every row has the same height.
    pub fn uniform(row_height: RowHeight) -> Self {
        Self {
            row_height,
            overrides: Vec::new(),
        }
    }

    /// Metrics with measured heights for some rows.
    pub fn with_overrides(row_height: RowHeight, overrides: Vec<u32>) -> Self {
        Self {
            row_height,
            overrides,
        }
    }

    /// The uniform row height.
    pub fn row_height(&self) -> RowHeight {
        self.row_height
    }

    /// The raw override table.
    pub fn overrides(&self) -> &[u32] {
        &self.overrides
    }

    /// True when no row has its own height.
    pub fn is_uniform(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Effective height of the row at `index`.
    pub fn height_of(&self, index: usize) -> u32 {
        match self.overrides.get(index) {
            Some(&h) if h > 0 => h,
            _ => self.row_height.get(),
        }
    }

    /// Builds the measured-height index for `item_count` rows.
    ///
    /// Returns `None` for uniform metrics so callers take the closed-form path.
    pub fn height_index(&self, item_count: usize) -> Option<HeightIndex> {
        if self.is_uniform() {
            return None;
        }
        Some(HeightIndex::from_heights(
            (0..item_count).map(|i| self.height_of(i)),
        ))
    }

    /// Total content height of `item_count` rows.
    pub fn content_height(&self, item_count: usize) -> u64 {
        if self.is_uniform() {
            item_count as u64 * u64::from(self.row_height.get())
        } else {
            (0..item_count).map(|i| u64::from(self.height_of(i))).sum()
        }
    }
}
