//! Flow table widget.
//!
//! Renders only the rows the controller's committed window materializes.
//! The table area is the scroll container: a sticky header band of
//! `header_height` lines followed by the rows, scrolled by the controller's
//! viewport top. Rows scrolled under the header are clipped.

use crate::model::Flow;
use crate::view::constants::{
    KIND_COLUMN_WIDTH, SERVER_COLUMN_WIDTH, STATUS_COLUMN_WIDTH, TIME_COLUMN_WIDTH,
};
use crate::view::styles::TableStyles;
use crate::view_state::WindowController;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of the row number column.
const INDEX_COLUMN_WIDTH: u16 = 6;

/// Shown in the status column while an HTTP response is outstanding.
const PENDING_STATUS: &str = "…";

// ===== FlowTable Widget =====

/// Virtualized flow table.
pub struct FlowTable<'a> {
    controller: &'a WindowController,
    flows: &'a [Flow],
    styles: &'a TableStyles,
}

impl<'a> FlowTable<'a> {
    /// Create a table over the store's flows, windowed by `controller`.
    pub fn new(
        controller: &'a WindowController,
        flows: &'a [Flow],
        styles: &'a TableStyles,
    ) -> Self {
        Self {
            controller,
            flows,
            styles,
        }
    }
}

impl Widget for FlowTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let header_height = u16::try_from(self.controller.header_height())
            .unwrap_or(u16::MAX)
            .min(area.height);
        let columns = Columns::fit(area.width);
        let top = self.controller.viewport_top();
        let body_top = i64::from(area.y) + i64::from(header_height);
        let area_bottom = i64::from(area.bottom());

        for (index, flow) in self.controller.visible_records(self.flows) {
            let offset = i64::try_from(self.controller.row_offset(index)).unwrap_or(i64::MAX);
            let first_line = body_top.saturating_add(offset).saturating_sub(top);
            let height = i64::from(self.controller.row_height_of(index));
            let selection = self.controller.selection();
            let style = self.styles.row(
                index,
                selection.is_selected(&flow.id),
                selection.is_highlighted(&flow.id),
            );

            for line in 0..height {
                let y = first_line + line;
                if y < body_top {
                    continue;
                }
                if y >= area_bottom {
                    break;
                }
                let Ok(y) = u16::try_from(y) else { break };
                buf.set_style(Rect::new(area.x, y, area.width, 1), style);
                if line == 0 {
                    let row = columns.row(index, flow, self.styles);
                    buf.set_line(area.x, y, &row.patch_style(style), area.width);
                }
            }
        }

        if header_height > 0 {
            buf.set_line(area.x, area.y, &columns.header(self.styles), area.width);
        }
    }
}

// ===== Columns =====

/// Resolved column widths for one table width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    index: usize,
    time: usize,
    kind: usize,
    server: usize,
    status: usize,
    request: usize,
}

impl Columns {
    /// Lay out columns for `width` cells; the request column absorbs the rest.
    ///
    /// Fixed columns are dropped right to left until the request column keeps
    /// at least a few cells.
    fn fit(width: u16) -> Self {
        let width = usize::from(width);
        let mut columns = Self {
            index: usize::from(INDEX_COLUMN_WIDTH),
            time: usize::from(TIME_COLUMN_WIDTH),
            kind: usize::from(KIND_COLUMN_WIDTH),
            server: usize::from(SERVER_COLUMN_WIDTH),
            status: usize::from(STATUS_COLUMN_WIDTH),
            request: 0,
        };
        const MIN_REQUEST: usize = 8;
        let shrink: [fn(&mut Columns); 3] = [
            |c| c.server = 0,
            |c| c.time = 0,
            |c| c.index = 0,
        ];
        for step in shrink {
            if columns.fixed() + MIN_REQUEST <= width {
                break;
            }
            step(&mut columns);
        }
        columns.request = width.saturating_sub(columns.fixed());
        columns
    }

    /// Width taken by every column except the request column, separators included.
    fn fixed(&self) -> usize {
        [self.index, self.time, self.kind, self.server, self.status]
            .iter()
            .filter(|&&w| w > 0)
            .map(|w| w + 1)
            .sum()
    }

    fn header(&self, styles: &TableStyles) -> Line<'static> {
        self.line(
            [
                fit_right("#", self.index),
                fit("Time", self.time),
                fit("Kind", self.kind),
                fit("Server", self.server),
                fit("Request", self.request),
                fit_right("Status", self.status),
            ]
            .map(|text| Span::styled(text, styles.header)),
        )
    }

    fn row(&self, index: usize, flow: &Flow, styles: &TableStyles) -> Line<'static> {
        let time = flow.timestamp.format("%H:%M:%S%.3f").to_string();
        let server = match (&flow.request, &flow.server) {
            (Some(request), _) => request.host.as_str(),
            (None, Some(server)) => server.as_str(),
            (None, None) => "",
        };
        let request = flow
            .request
            .as_ref()
            .map(|r| format!("{} {}", r.method, r.path))
            .unwrap_or_default();
        let (status, status_style) = match (&flow.response, flow.kind.is_directional()) {
            (Some(response), _) => (
                response.status_code.to_string(),
                styles.status_code(response.status_code),
            ),
            (None, true) => (PENDING_STATUS.to_string(), Style::default()),
            (None, false) => (String::new(), Style::default()),
        };

        self.line([
            Span::raw(fit_right(&(index + 1).to_string(), self.index)),
            Span::raw(fit(&time, self.time)),
            Span::styled(fit(flow.kind.label(), self.kind), styles.kind(flow.kind)),
            Span::raw(fit(server, self.server)),
            Span::raw(fit(&request, self.request)),
            Span::styled(fit_right(&status, self.status), status_style),
        ])
    }

    /// Join non-empty cells with single-space separators.
    fn line(&self, cells: [Span<'static>; 6]) -> Line<'static> {
        let widths = [
            self.index,
            self.time,
            self.kind,
            self.server,
            self.request,
            self.status,
        ];
        let mut spans = Vec::with_capacity(cells.len() * 2);
        for (cell, width) in cells.into_iter().zip(widths) {
            if width == 0 {
                continue;
            }
            if !spans.is_empty() {
                spans.push(Span::raw(" "));
            }
            spans.push(cell);
        }
        Line::from(spans)
    }
}

// ===== Text fitting =====

/// Truncate or pad `text` to exactly `width` terminal cells, left aligned.
///
/// Truncated text ends in an ellipsis. Wide characters that would straddle
/// the edge are replaced by padding.
pub fn fit(text: &str, width: usize) -> String {
    let (mut out, used) = truncate(text, width);
    out.push_str(&" ".repeat(width - used));
    out
}

/// Like [`fit`], right aligned.
pub fn fit_right(text: &str, width: usize) -> String {
    let (out, used) = truncate(text, width);
    let mut padded = " ".repeat(width - used);
    padded.push_str(&out);
    padded
}

/// Longest prefix of `text` fitting `width` cells, and the cells it uses.
fn truncate(text: &str, width: usize) -> (String, usize) {
    if text.width() <= width {
        return (text.to_string(), text.width());
    }
    if width == 0 {
        return (String::new(), 0);
    }
    let budget = width - 1;
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    (out, used + 1)
}
