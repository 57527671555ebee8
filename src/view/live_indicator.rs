//! LIVE indicator widget for status bar.
//!
//! Displays tailing status:
//! - Gray when the source is exhausted
//! - Blinking green while the source is live and the table follows the tail
//! - Yellow "PAUSED" while the source is live but the user has scrolled away

use ratatui::{
    style::{Color, Style},
    text::Span,
};

/// Text content for the LIVE indicator.
const LIVE_INDICATOR_TEXT: &str = "[LIVE] ";

/// Text shown while live data arrives off screen.
const PAUSED_INDICATOR_TEXT: &str = "[PAUSED] ";

/// Tailing state shown by the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailMode {
    /// No more data will arrive.
    Static,
    /// Data is arriving and the viewport is pinned to the bottom.
    Following,
    /// Data is arriving but the viewport has been scrolled away.
    Paused,
}

impl TailMode {
    /// Derive the mode from source liveness and bottom anchoring.
    pub fn from_state(source_live: bool, at_bottom: bool) -> Self {
        match (source_live, at_bottom) {
            (false, _) => TailMode::Static,
            (true, true) => TailMode::Following,
            (true, false) => TailMode::Paused,
        }
    }
}

/// LIVE indicator widget that renders based on TailMode and blink state.
///
/// This widget is pure and stateless. The blink state is passed in rather
/// than managed internally; the event loop toggles it on every tick.
///
/// # Examples
///
/// ```rust
/// use flowview::view::live_indicator::{LiveIndicator, TailMode};
///
/// let span = LiveIndicator::new(TailMode::Paused, false).render();
/// assert_eq!(span.content, "[PAUSED] ");
/// ```
#[derive(Debug, Clone)]
pub struct LiveIndicator {
    mode: TailMode,
    blink_on: bool,
}

impl LiveIndicator {
    /// Indicator for `mode`; `blink_on` is the current blink phase.
    pub fn new(mode: TailMode, blink_on: bool) -> Self {
        Self { mode, blink_on }
    }

    /// Render the indicator as a ratatui Span.
    ///
    /// - `Static` → Gray "[LIVE]" text
    /// - `Following` with `blink_on=true` → Green "[LIVE]" text
    /// - `Following` with `blink_on=false` → Empty string (hidden)
    /// - `Paused` → Yellow "[PAUSED]" text, never blinking
    pub fn render(&self) -> Span<'static> {
        match self.mode {
            TailMode::Static => {
                Span::styled(LIVE_INDICATOR_TEXT, Style::default().fg(Color::Gray))
            }
            TailMode::Following if self.blink_on => {
                Span::styled(LIVE_INDICATOR_TEXT, Style::default().fg(Color::Green))
            }
            TailMode::Following => Span::raw(""),
            TailMode::Paused => {
                Span::styled(PAUSED_INDICATOR_TEXT, Style::default().fg(Color::Yellow))
            }
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "live_indicator_tests.rs"]
mod tests;
