//! Flow table styling configuration.
//!
//! Provides the styles for table rows (stripes, selection, highlighting),
//! flow kinds, and the filter and status bars.

use crate::model::FlowKind;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        Self::resolve(no_color_flag, std::env::var_os("NO_COLOR").is_some())
    }

    fn resolve(no_color_flag: bool, no_color_env: bool) -> Self {
        Self {
            enabled: !no_color_flag && !no_color_env,
        }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== TableStyles =====

/// Styles for the flow table and its bars.
///
/// Without colors, selection still shows through reverse video and
/// highlighting through bold, so both stay visible on monochrome terminals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStyles {
    colors: bool,
    /// Table header row.
    pub header: Style,
    /// Odd rows of the alternating stripe.
    pub stripe: Style,
    /// Selected rows.
    pub selected: Style,
    /// Highlighted rows.
    pub highlighted: Style,
    /// Enabled entries in the filter bar.
    pub enabled_toggle: Style,
    /// Disabled entries in the filter bar.
    pub disabled_toggle: Style,
    /// Status bar text.
    pub status: Style,
}

impl TableStyles {
    /// Create styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        if config.colors_enabled() {
            Self {
                colors: true,
                header: bold.fg(Color::Cyan),
                stripe: Style::default().bg(Color::Rgb(30, 30, 36)),
                selected: Style::default().add_modifier(Modifier::REVERSED),
                highlighted: Style::default().fg(Color::Yellow),
                enabled_toggle: bold.fg(Color::Green),
                disabled_toggle: Style::default().fg(Color::DarkGray),
                status: Style::default().fg(Color::Gray),
            }
        } else {
            Self {
                colors: false,
                header: bold,
                stripe: Style::default(),
                selected: Style::default().add_modifier(Modifier::REVERSED),
                highlighted: bold,
                enabled_toggle: bold,
                disabled_toggle: Style::default().add_modifier(Modifier::DIM),
                status: Style::default(),
            }
        }
    }

    /// Foreground for a flow kind label.
    pub fn kind(&self, kind: FlowKind) -> Style {
        if !self.colors {
            return Style::default();
        }
        Style::default().fg(match kind {
            FlowKind::Http => Color::Blue,
            FlowKind::Tcp => Color::Magenta,
            FlowKind::Udp => Color::LightMagenta,
            FlowKind::Dns => Color::Green,
        })
    }

    /// Foreground for an HTTP status code column.
    pub fn status_code(&self, code: u16) -> Style {
        if !self.colors {
            return Style::default();
        }
        Style::default().fg(match code {
            100..=299 => Color::Green,
            300..=399 => Color::Yellow,
            _ => Color::Red,
        })
    }

    /// Style for a table row given its view index and state.
    ///
    /// Stripes key off the view index, so they stay put as the window
    /// shifts.
    pub fn row(&self, index: usize, selected: bool, highlighted: bool) -> Style {
        let mut style = if index % 2 == 1 {
            self.stripe
        } else {
            Style::default()
        };
        if highlighted {
            style = style.patch(self.highlighted);
        }
        if selected {
            style = style.patch(self.selected);
        }
        style
    }
}

impl Default for TableStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
