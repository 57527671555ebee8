//! HeightIndex - O(log n) prefix sums and lower_bound via Fenwick tree
//!
//! Backs the measured-height path of the window calculation: row offsets
//! and "which row contains this scroll offset" without walking every row.
//!
//! # Complexity
//!
//! - `from_heights`: O(n log n)
//! - `set`: O(log n)
//! - `prefix_sum` / `offset_of`: O(log n)
//! - `lower_bound`: O(log² n)
//! - `total`: O(log n)
//! - `len`: O(1)

/// HeightIndex wraps a Fenwick tree for prefix sum queries and point updates.
///
/// Built for a fixed number of rows; rebuilt whenever the row sequence is
/// re-derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightIndex {
    /// Fenwick tree backing storage (1-indexed internally, 0-indexed API).
    tree: Vec<i64>,
}

impl HeightIndex {
    /// Builds an index over the given per-row heights, in row order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowview::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_heights([3, 4, 5]);
    /// assert_eq!(index.len(), 3);
    /// assert_eq!(index.total(), 12);
    /// ```
    pub fn from_heights<I>(heights: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let heights: Vec<u32> = heights.into_iter().collect();
        let mut tree = vec![0i64; heights.len()];
        for (i, &height) in heights.iter().enumerate() {
            if height != 0 {
                fenwick::array::update(&mut tree, i, i64::from(height));
            }
        }
        Self { tree }
    }

    /// Sets the height at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowview::view_state::height_index::HeightIndex;
    /// let mut index = HeightIndex::from_heights([5]);
    /// index.set(0, 10);
    /// assert_eq!(index.prefix_sum(0), 10);
    /// ```
    pub fn set(&mut self, index: usize, height: u32) {
        let delta = i64::from(height) - i64::from(self.height(index));
        if delta != 0 {
            fenwick::array::update(&mut self.tree, index, delta);
        }
    }

    /// Height of a single row.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn height(&self, index: usize) -> u32 {
        let height = self.prefix_sum(index) - self.offset_of(index);
        u32::try_from(height).unwrap_or(u32::MAX)
    }

    /// Returns the cumulative height up to and including the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowview::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_heights([3, 4, 5]);
    /// assert_eq!(index.prefix_sum(0), 3);
    /// assert_eq!(index.prefix_sum(1), 7);
    /// assert_eq!(index.prefix_sum(2), 12);
    /// ```
    pub fn prefix_sum(&self, index: usize) -> u64 {
        assert!(
            index < self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );

        let sum = fenwick::array::prefix_sum(&self.tree, index);
        sum.max(0) as u64
    }

    /// Offset of the top edge of a row: the sum of all heights before it.
    ///
    /// `offset_of(len())` is the total height.
    pub fn offset_of(&self, index: usize) -> u64 {
        if index == 0 {
            0
        } else {
            self.prefix_sum(index - 1)
        }
    }

    /// Binary search for the first index where `prefix_sum(index) > value`.
    ///
    /// That is the row whose span `[offset_of(i), prefix_sum(i))` contains
    /// `value`.
    ///
    /// # Returns
    ///
    /// - `Some(index)` if there exists an index where `prefix_sum(index) > value`
    /// - `None` if `value >= total()` or the index is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowview::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_heights([10, 20, 15]);
    ///
    /// assert_eq!(index.lower_bound(0), Some(0));
    /// assert_eq!(index.lower_bound(10), Some(1));
    /// assert_eq!(index.lower_bound(30), Some(2));
    /// assert_eq!(index.lower_bound(100), None);
    /// ```
    pub fn lower_bound(&self, value: u64) -> Option<usize> {
        let mut left = 0;
        let mut right = self.len();

        while left < right {
            let mid = left + (right - left) / 2;
            if self.prefix_sum(mid) > value {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        (left < self.len()).then_some(left)
    }

    /// Returns the total cumulative height of all rows.
    pub fn total(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.prefix_sum(self.len() - 1)
        }
    }

    /// Returns the number of rows in the index.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if the index contains no rows.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}
