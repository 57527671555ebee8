//! View-state layer - filtering, windowing, anchoring, and selection follow
//!
//! This module implements the pure core of the flow table: everything that
//! decides *which* rows are materialized and *where* the viewport sits. It has
//! no terminal dependency; the `view` layer renders what it commits.
//!
//! # Module Structure
//!
//! - `types`: Core newtypes (RowHeight, ViewportGeometry) and scroll clamping
//! - `height_index`: HeightIndex - O(log n) prefix sums via Fenwick tree
//! - `row_metrics`: RowMetrics - uniform height plus per-row overrides
//! - `window`: WindowCalculator - visible index range and spacer heights
//! - `filter`: FilterSpec and the derived OrderedView
//! - `scroll_anchor`: Two-phase bottom anchoring for live tailing
//! - `selection`: SelectionState and the scroll-into-view follower
//! - `controller`: WindowController - reconciles all of the above per event

pub mod controller;
pub mod filter;
pub mod height_index;
pub mod row_metrics;
pub mod scroll_anchor;
pub mod selection;
pub mod types;
pub mod window;

pub use controller::{TableSettings, Trigger, WindowController, WindowSnapshot};
pub use filter::{apply_filter, Direction, FilterSpec, OrderedView};
pub use height_index::HeightIndex;
pub use row_metrics::RowMetrics;
pub use scroll_anchor::{BottomAnchor, ScrollAnchor};
pub use selection::{SelectionFollower, SelectionState};
pub use types::{InvalidRowHeight, RowHeight, ViewportGeometry};
pub use window::{compute_window, WindowCalculator, WindowState};
