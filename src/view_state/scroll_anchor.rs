//! Bottom anchoring ("live tail") across content growth
//!
//! Two phases bracket every mutation of the ordered view:
//!
//! 1. [`ScrollAnchor::capture`] runs against the geometry and content height
//!    from *before* the mutation and records whether the viewport sat at the
//!    bottom.
//! 2. [`BottomAnchor::restore`] runs against the content height from *after*
//!    the mutation and, only if the viewport was at the bottom, returns the
//!    offset that puts it back there.
//!
//! Capturing after the mutation measures distance to the new bottom and
//! loses the intent, so the order is load-bearing.

use super::types::{max_scroll_top, ViewportGeometry};

/// Default slack when deciding whether the viewport is at the bottom.
pub const DEFAULT_BOTTOM_EPSILON: u32 = 0;

/// Whether `viewport` is scrolled to the end of `content_height`.
pub fn is_at_bottom(viewport: ViewportGeometry, content_height: u64, epsilon: u32) -> bool {
    let content = i64::try_from(content_height).unwrap_or(i64::MAX);
    viewport.bottom() >= content.saturating_sub(i64::from(epsilon))
}

/// Bottom-anchoring policy for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollAnchor {
    epsilon: u32,
}

impl Default for ScrollAnchor {
    fn default() -> Self {
        Self::new(DEFAULT_BOTTOM_EPSILON)
    }
}

impl ScrollAnchor {
    /// Anchor with the given bottom tolerance.
    pub fn new(epsilon: u32) -> Self {
        Self { epsilon }
    }

    /// Bottom tolerance.
    pub fn epsilon(&self) -> u32 {
        self.epsilon
    }

    /// Phase one: measure before the view reflects new data.
    ///
    /// Returns `None` when the container has not been measured yet; the
    /// whole protocol is then skipped and the scroll position left alone.
    pub fn capture(
        &self,
        viewport: Option<ViewportGeometry>,
        content_height: u64,
    ) -> Option<BottomAnchor> {
        let viewport = viewport?;
        Some(BottomAnchor {
            was_at_bottom: is_at_bottom(viewport, content_height, self.epsilon),
        })
    }
}

/// "Was the viewport at the bottom before this update."
///
/// Transient: produced by [`ScrollAnchor::capture`] and consumed by
/// [`BottomAnchor::restore`] within the same update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a captured anchor must be restored after the mutation"]
pub struct BottomAnchor {
    was_at_bottom: bool,
}

impl BottomAnchor {
    /// Whether the viewport sat at the bottom when captured.
    pub fn was_at_bottom(&self) -> bool {
        self.was_at_bottom
    }

    /// Phase two: the offset that re-pins the viewport to the new bottom.
    ///
    /// `None` means leave the scroll position untouched, either because the
    /// user had scrolled away or because geometry is unavailable.
    pub fn restore(self, viewport: Option<ViewportGeometry>, content_height: u64) -> Option<i64> {
        if !self.was_at_bottom {
            return None;
        }
        let viewport = viewport?;
        Some(max_scroll_top(content_height, viewport.height))
    }
}
