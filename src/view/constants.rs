//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the filter bar in lines.
///
/// Single line at the top of the screen listing kind toggles and the
/// direction mode.
pub const FILTER_BAR_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
///
/// Single line at the bottom of the screen for counts, tail state and
/// keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Rows scrolled per mouse wheel notch.
pub const MOUSE_SCROLL_ROWS: i64 = 3;

/// Column widths of the flow table, in terminal cells.
///
/// The request column takes whatever width remains.
pub const TIME_COLUMN_WIDTH: u16 = 12;
/// Width of the kind column.
pub const KIND_COLUMN_WIDTH: u16 = 5;
/// Width of the server address column.
pub const SERVER_COLUMN_WIDTH: u16 = 22;
/// Width of the HTTP status column.
pub const STATUS_COLUMN_WIDTH: u16 = 6;
