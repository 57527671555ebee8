//! Screen layout rendering.
//!
//! Pure layout logic: splits the frame into filter bar, flow table and
//! status bar, and renders each from the controller's committed state.

use crate::model::{Flow, FlowKind};
use crate::view::constants::{FILTER_BAR_HEIGHT, STATUS_BAR_HEIGHT};
use crate::view::live_indicator::LiveIndicator;
use crate::view::styles::TableStyles;
use crate::view::table::FlowTable;
use crate::view_state::WindowController;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Kind toggles and direction, one line.
    pub filter_bar: Rect,
    /// Flow table including its header.
    pub table: Rect,
    /// Tail state and counts, one line.
    pub status_bar: Rect,
}

/// Split `area` vertically: filter bar, table, status bar.
pub fn calculate_areas(area: Rect) -> ScreenAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FILTER_BAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    ScreenAreas {
        filter_bar: chunks[0],
        table: chunks[1],
        status_bar: chunks[2],
    }
}

/// Everything one frame renders.
pub struct Screen<'a> {
    /// Window state for the table.
    pub controller: &'a WindowController,
    /// All stored flows, in store order.
    pub flows: &'a [Flow],
    /// Resolved styles.
    pub styles: &'a TableStyles,
    /// Tail state shown in the status bar.
    pub indicator: LiveIndicator,
}

/// Render the full screen.
pub fn render_layout(frame: &mut Frame, screen: &Screen<'_>) {
    let areas = calculate_areas(frame.area());

    frame.render_widget(
        Paragraph::new(filter_bar_line(screen.controller, screen.styles)),
        areas.filter_bar,
    );
    frame.render_widget(
        FlowTable::new(screen.controller, screen.flows, screen.styles),
        areas.table,
    );
    frame.render_widget(
        Paragraph::new(status_bar_line(screen)),
        areas.status_bar,
    );
}

/// Kind toggles with their keys, then the direction mode.
fn filter_bar_line(controller: &WindowController, styles: &TableStyles) -> Line<'static> {
    let filter = controller.filter();
    let mut spans = vec![Span::styled(" Kinds:", styles.status)];
    for (n, kind) in FlowKind::ALL.into_iter().enumerate() {
        let style = if filter.has_kind(kind) {
            styles.enabled_toggle
        } else {
            styles.disabled_toggle
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!("[{}]{}", n + 1, kind.label()), style));
    }
    spans.push(Span::styled(
        format!("  Direction(d): {}", filter.direction()),
        styles.status,
    ));
    if !filter.is_identity() {
        spans.push(Span::styled("  a:reset", styles.status));
    }
    Line::from(spans)
}

/// Live indicator, counts, materialized range and selection.
fn status_bar_line(screen: &Screen<'_>) -> Line<'static> {
    let controller = screen.controller;
    let window = controller.window();
    let range = if window.is_empty() {
        "rows -".to_string()
    } else {
        format!("rows {}-{}", window.start + 1, window.end)
    };
    let mut text = format!(
        "{}/{} flows | {}",
        controller.view().len(),
        screen.flows.len(),
        range
    );
    if let Some(id) = controller.selection().last_selected() {
        text.push_str(&format!(" | selected {id}"));
    }
    text.push_str(" | q:quit");

    Line::from(vec![
        screen.indicator.render(),
        Span::styled(text, screen.styles.status),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FlowId;
    use crate::view::live_indicator::TailMode;
    use crate::view::styles::ColorConfig;
    use crate::view_state::{FilterSpec, TableSettings};
    use chrono::{TimeZone, Utc};
    use ratatui::{backend::TestBackend, Terminal};

    fn flows(count: usize) -> Vec<Flow> {
        (0..count)
            .map(|i| Flow {
                id: FlowId::new(format!("f{i}")).unwrap(),
                kind: if i % 2 == 0 { FlowKind::Tcp } else { FlowKind::Dns },
                timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap(),
                server: Some(format!("10.0.0.{i}:53")),
                request: None,
                response: None,
            })
            .collect()
    }

    fn screen_text(controller: &WindowController, flows: &[Flow]) -> Vec<String> {
        let styles = TableStyles::with_color_config(ColorConfig::from_env_and_args(true));
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|frame| {
                render_layout(
                    frame,
                    &Screen {
                        controller,
                        flows,
                        styles: &styles,
                        indicator: LiveIndicator::new(TailMode::Static, false),
                    },
                )
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn areas_stack_bars_around_table() {
        let areas = calculate_areas(Rect::new(0, 0, 80, 24));
        assert_eq!(areas.filter_bar, Rect::new(0, 0, 80, 1));
        assert_eq!(areas.table, Rect::new(0, 1, 80, 22));
        assert_eq!(areas.status_bar, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn status_bar_reports_counts_and_range() {
        let data = flows(30);
        let mut controller = WindowController::new(TableSettings {
            header_height: 1,
            ..TableSettings::default()
        });
        controller.on_data_changed(&data);
        controller.on_resize(10);

        let lines = screen_text(&controller, &data);
        let status = &lines[11];
        assert!(status.contains("30/30 flows"), "status: {status:?}");
        assert!(status.contains("rows 1-12"), "status: {status:?}");
        assert!(status.starts_with("[LIVE] "));
    }

    #[test]
    fn filter_bar_reflects_toggles() {
        let data = flows(30);
        let mut controller = WindowController::new(TableSettings::default());
        controller.on_data_changed(&data);
        controller.on_resize(10);
        controller.set_filter(FilterSpec::default().toggled(FlowKind::Dns), &data);

        let lines = screen_text(&controller, &data);
        assert!(lines[0].contains("[4]DNS"));
        assert!(lines[0].contains("a:reset"));
        assert!(lines[11].contains("15/30 flows"), "status: {:?}", lines[11]);
    }
}
