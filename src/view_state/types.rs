//! Core view-state newtypes

/// Uniform height of one table row, in pixels (or terminal lines).
///
/// Always >= 1. Validated once when a table is configured, never per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowHeight(u32);

/// Error returned when attempting to create a RowHeight of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("RowHeight must be >= 1 (got {0})")]
pub struct InvalidRowHeight(pub u32);

impl RowHeight {
    /// One unit tall; the natural height of a terminal row.
    pub const ONE: Self = Self(1);

    /// Smart constructor that validates the height is >= 1.
    pub fn new(height: u32) -> Result<Self, InvalidRowHeight> {
        if height == 0 {
            Err(InvalidRowHeight(height))
        } else {
            Ok(Self(height))
        }
    }

    /// Get the raw u32 value.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Height as a signed offset, for scroll arithmetic.
    pub fn as_offset(&self) -> i64 {
        i64::from(self.0)
    }
}

impl Default for RowHeight {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for RowHeight {
    type Error = InvalidRowHeight;

    fn try_from(height: u32) -> Result<Self, Self::Error> {
        Self::new(height)
    }
}

/// Scroll geometry reported by the host container.
///
/// `top` is signed: hosts may report overscroll (rubber banding) or a stale
/// offset from before content shrank. Consumers clamp it, they never reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportGeometry {
    /// Scroll offset of the viewport's top edge.
    pub top: i64,
    /// Visible height of the viewport.
    pub height: u32,
}

impl ViewportGeometry {
    /// Create new viewport geometry.
    pub fn new(top: i64, height: u32) -> Self {
        Self { top, height }
    }

    /// Offset of the viewport's bottom edge.
    pub fn bottom(&self) -> i64 {
        self.top.saturating_add(i64::from(self.height))
    }

    /// Same height, different scroll offset.
    pub fn with_top(self, top: i64) -> Self {
        Self { top, ..self }
    }
}

/// Largest valid scroll offset for content of `content_height` shown in a
/// viewport of `viewport_height`.
pub fn max_scroll_top(content_height: u64, viewport_height: u32) -> i64 {
    let max = content_height.saturating_sub(u64::from(viewport_height));
    i64::try_from(max).unwrap_or(i64::MAX)
}

/// Clamp a scroll offset into `[0, max_scroll_top]`.
pub fn clamp_scroll_top(top: i64, content_height: u64, viewport_height: u32) -> i64 {
    top.clamp(0, max_scroll_top(content_height, viewport_height))
}
