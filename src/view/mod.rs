//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod layout;
pub mod live_indicator;
mod styles;
pub mod table;

pub use layout::{calculate_areas, render_layout, Screen, ScreenAreas};
pub use live_indicator::{LiveIndicator, TailMode};
pub use styles::{ColorConfig, TableStyles};
pub use table::FlowTable;

use crate::config::keybindings::KeyBindings;
use crate::model::{AppError, FlowMessage, KeyAction};
use crate::source::FlowSource;
use crate::store::FlowStore;
use crate::view::constants::MOUSE_SCROLL_ROWS;
use crate::view_state::{TableSettings, WindowController};
use crossterm::{
    event::{self, Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Position, Rect},
    Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] crate::model::InputError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Runtime options the TUI takes from resolved configuration.
#[derive(Debug, Clone)]
pub struct TuiOptions {
    /// Windowing settings for the flow table.
    pub table: TableSettings,
    /// Interval between source polls and indicator blinks.
    pub tick_rate: Duration,
    /// Resolved styles.
    pub styles: TableStyles,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    store: FlowStore,
    controller: WindowController,
    source: FlowSource,
    key_bindings: KeyBindings,
    styles: TableStyles,
    tick_rate: Duration,
    blink_on: bool,
    /// Last rendered table area (for mouse hit testing)
    last_table_area: Option<Rect>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(source: FlowSource, options: TuiOptions) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Self::with_terminal(terminal, source, options)
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Input events redraw
    /// immediately; the source is polled on every tick.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if event::poll(self.tick_rate)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        self.draw()?;
                    }
                    Event::Resize(width, height) => {
                        self.handle_resize(width, height);
                        self.draw()?;
                    }
                    _ => {}
                }
            } else {
                let changed = self.poll_source()?;
                let live = self.source.is_live();
                if live {
                    self.blink_on = !self.blink_on;
                }
                if changed || live {
                    self.draw()?;
                }
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build an app over any backend and load the source's initial batch.
    pub fn with_terminal(
        terminal: Terminal<B>,
        source: FlowSource,
        options: TuiOptions,
    ) -> Result<Self, TuiError> {
        let mut app = Self {
            terminal,
            store: FlowStore::new(),
            controller: WindowController::new(options.table),
            source,
            key_bindings: KeyBindings::default(),
            styles: options.styles,
            tick_rate: options.tick_rate,
            blink_on: true,
            last_table_area: None,
        };
        let size = app.terminal.size()?;
        app.handle_resize(size.width, size.height);
        app.poll_source()?;
        info!(flows = app.store.len(), live = app.source.is_live(), "Initial load");
        Ok(app)
    }

    /// Poll the source and feed anything new through the controller.
    fn poll_source(&mut self) -> Result<bool, TuiError> {
        let messages = self.source.poll()?;
        Ok(self.ingest(messages))
    }

    /// Apply messages to the store; returns whether the store changed.
    fn ingest(&mut self, messages: Vec<FlowMessage>) -> bool {
        if messages.is_empty() {
            return false;
        }
        let count = messages.len();
        if !self.store.apply_all(messages) {
            return false;
        }
        debug!(count, total = self.store.len(), "Applied flow messages");
        self.controller.on_data_changed(self.store.flows());
        true
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        if let Some(shift) = action.selection_shift() {
            self.controller.select_relative(shift);
            return false;
        }

        let row = self.controller.row_height().as_offset();
        match action {
            KeyAction::ClearSelection => {
                self.controller.clear_selection();
            }
            KeyAction::ScrollUp => {
                self.controller.scroll_by(-row);
            }
            KeyAction::ScrollDown => {
                self.controller.scroll_by(row);
            }
            KeyAction::ToggleKind(kind) => {
                let filter = self.controller.filter().toggled(kind);
                self.controller.set_filter(filter, self.store.flows());
            }
            KeyAction::CycleDirection => {
                let filter = self.controller.filter();
                let filter = filter.with_direction(filter.direction().cycle());
                self.controller.set_filter(filter, self.store.flows());
            }
            KeyAction::ResetFilter => {
                self.controller.set_filter(Default::default(), self.store.flows());
            }
            KeyAction::Quit => return true,
            KeyAction::SelectNext
            | KeyAction::SelectPrev
            | KeyAction::SelectPageDown
            | KeyAction::SelectPageUp
            | KeyAction::SelectLast
            | KeyAction::SelectFirst => {}
        }
        false
    }

    /// Handle a single mouse event
    ///
    /// Wheel scrolls the table; a left click selects the row under the cursor.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let rows = MOUSE_SCROLL_ROWS * self.controller.row_height().as_offset();
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.controller.scroll_by(-rows);
            }
            MouseEventKind::ScrollDown => {
                self.controller.scroll_by(rows);
            }
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row),
            _ => {}
        }
    }

    fn click(&mut self, column: u16, row: u16) {
        let Some(area) = self.last_table_area else {
            return;
        };
        if !area.contains(Position::new(column, row)) {
            return;
        }
        let line = u32::from(row - area.y);
        let Some(below_header) = line.checked_sub(self.controller.header_height()) else {
            return;
        };
        let Ok(top) = u64::try_from(self.controller.viewport_top()) else {
            return;
        };
        let offset = top.saturating_add(u64::from(below_header));
        let Some(id) = self
            .controller
            .index_at_offset(offset)
            .and_then(|index| self.controller.view().id_at(index))
            .cloned()
        else {
            return;
        };
        let mut selection = self.controller.selection().clone();
        selection.select([id]);
        self.controller.set_selection(selection);
    }

    /// Handle a terminal resize event
    ///
    /// The table area is the controller's viewport.
    fn handle_resize(&mut self, width: u16, height: u16) {
        let table = calculate_areas(Rect::new(0, 0, width, height)).table;
        debug!(width, height, table_height = table.height, "Handling resize");
        self.last_table_area = Some(table);
        self.controller.on_resize(u32::from(table.height));
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let table = calculate_areas(Rect::new(0, 0, size.width, size.height)).table;
        if self.last_table_area != Some(table) {
            self.handle_resize(size.width, size.height);
        }
        // The terminal renders straight from the controller's viewport top,
        // so queued scroll requests need no further host action.
        if let Some(top) = self.controller.take_scroll_request() {
            debug!(top, "Scrolled to controller offset");
        }

        let indicator = LiveIndicator::new(
            TailMode::from_state(self.source.is_live(), self.controller.is_at_bottom()),
            self.blink_on,
        );
        let screen = Screen {
            controller: &self.controller,
            flows: self.store.flows(),
            styles: &self.styles,
            indicator,
        };
        self.terminal.draw(|frame| render_layout(frame, &screen))?;
        Ok(())
    }
}

/// Initialize and run the TUI application over a flow source
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(source: FlowSource, options: TuiOptions) -> Result<(), TuiError> {
    let mut app = TuiApp::new(source, options)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
