//! Scenario tests: a live flow stream feeding the store and the window
//! controller, the way the event loop wires them.

use flowview::model::{Flow, FlowKind, FlowMessage};
use flowview::source::SyntheticSource;
use flowview::store::FlowStore;
use flowview::view_state::{Direction, FilterSpec, RowHeight, TableSettings, WindowController};
use std::time::{Duration, Instant};

const RATE: Duration = Duration::from_millis(100);

struct Harness {
    source: SyntheticSource,
    store: FlowStore,
    controller: WindowController,
    clock: Instant,
}

impl Harness {
    fn new(initial: usize, row_height: u32, viewport: u32) -> Self {
        let mut harness = Self {
            source: SyntheticSource::new(initial, Some(RATE)),
            store: FlowStore::new(),
            controller: WindowController::new(TableSettings {
                row_height: RowHeight::new(row_height).unwrap(),
                header_height: 1,
                ..TableSettings::default()
            }),
            clock: Instant::now(),
        };
        harness.controller.on_resize(viewport);
        let batch = harness.source.poll_at(harness.clock);
        harness.feed(batch);
        harness
    }

    /// Advance the synthetic clock by `ticks` flow intervals and ingest.
    fn advance(&mut self, ticks: u32) -> usize {
        self.clock += RATE * ticks;
        let messages = self.source.poll_at(self.clock);
        let count = messages
            .iter()
            .filter(|m| matches!(m, FlowMessage::Add { .. }))
            .count();
        self.feed(messages);
        count
    }

    fn feed(&mut self, messages: Vec<FlowMessage>) {
        if self.store.apply_all(messages) {
            self.controller.on_data_changed(self.store.flows());
        }
    }

    fn max_top(&self) -> i64 {
        let height = self.controller.viewport().map_or(0, |v| v.height);
        self.controller
            .scroll_extent()
            .saturating_sub(u64::from(height)) as i64
    }
}

#[test]
fn initial_batch_lands_at_the_tail() {
    let harness = Harness::new(500, 1, 20);
    assert_eq!(harness.store.len(), 500);
    assert!(harness.controller.is_at_bottom());
    assert_eq!(harness.controller.viewport_top(), harness.max_top());
    assert_eq!(harness.controller.window().end, 500);
}

#[test]
fn scrolling_to_top_after_initial_batch_shows_first_flow() {
    let mut harness = Harness::new(500, 1, 20);
    harness.controller.on_scroll(0);
    assert_eq!(harness.controller.window().start, 0);
    harness.advance(5);
    assert_eq!(harness.controller.viewport_top(), 0);
}

#[test]
fn tail_follows_while_pinned_to_bottom() {
    let mut harness = Harness::new(500, 2, 40);
    harness.controller.on_scroll(i64::MAX);
    assert_eq!(harness.controller.viewport_top(), harness.max_top());

    for _ in 0..20 {
        let added = harness.advance(3);
        assert_eq!(added, 3);
        assert!(harness.controller.is_at_bottom());
        assert_eq!(harness.controller.viewport_top(), harness.max_top());
        let last = harness.controller.view().len() - 1;
        assert!(harness.controller.window().contains(last));
    }
    assert_eq!(harness.store.len(), 560);
}

#[test]
fn reading_history_is_not_interrupted() {
    let mut harness = Harness::new(500, 1, 20);
    harness.controller.on_scroll(100);

    for _ in 0..10 {
        harness.advance(5);
        assert_eq!(harness.controller.viewport_top(), 100);
    }
    assert!(!harness.controller.is_at_bottom());
}

#[test]
fn scrolling_back_to_bottom_resumes_tailing() {
    let mut harness = Harness::new(200, 1, 20);
    harness.controller.on_scroll(50);
    harness.advance(10);
    assert_eq!(harness.controller.viewport_top(), 50);

    harness.controller.on_scroll(i64::MAX);
    harness.advance(10);
    assert!(harness.controller.is_at_bottom());
}

#[test]
fn selection_survives_appends_and_stays_visible() {
    let mut harness = Harness::new(300, 1, 20);
    harness.controller.select_relative(isize::MIN);
    harness.controller.select_relative(150);
    let selected = harness.controller.selection().only_selected().cloned().unwrap();
    let index = harness.controller.view().index_of(&selected).unwrap();
    assert_eq!(index, 150);
    assert!(harness.controller.window().contains(index));

    harness.advance(20);
    assert_eq!(
        harness.controller.selection().only_selected(),
        Some(&selected)
    );
    assert!(harness.controller.window().contains(index));
}

#[test]
fn direction_filter_sees_responses_arrive() {
    let mut harness = Harness::new(100, 1, 20);
    let outbound = FilterSpec::default().with_direction(Direction::Outbound);
    harness
        .controller
        .set_filter(outbound, harness.store.flows());
    let pending_before: Vec<Flow> = harness
        .controller
        .view()
        .records(harness.store.flows(), 0..harness.controller.view().len())
        .map(|(_, f)| f.clone())
        .collect();
    assert!(pending_before
        .iter()
        .all(|f| f.kind != FlowKind::Http || f.response.is_none()));

    // Responses to everything pending arrive on the next tick.
    harness.advance(1);
    for flow in &pending_before {
        if flow.kind == FlowKind::Http {
            let now = harness.store.get(&flow.id).unwrap();
            assert!(now.response.is_some(), "{} still pending", flow.id);
            assert!(harness.controller.view().index_of(&flow.id).is_none());
        }
    }
}

#[test]
fn filter_toggle_while_tailing_keeps_bottom() {
    let mut harness = Harness::new(400, 1, 20);
    harness.controller.on_scroll(i64::MAX);
    let filter = harness.controller.filter().toggled(FlowKind::Dns);
    harness.controller.set_filter(filter, harness.store.flows());

    harness.advance(10);
    assert!(harness.controller.is_at_bottom());
    assert!(harness.controller.view().len() < harness.store.len());
}

#[test]
fn reset_replaces_everything() {
    let mut harness = Harness::new(100, 1, 20);
    harness.controller.on_scroll(40);
    harness.controller.select_relative(1);

    harness.feed(vec![FlowMessage::Reset { flows: Vec::new() }]);
    assert_eq!(harness.store.len(), 0);
    assert!(harness.controller.window().is_empty());
    assert_eq!(harness.controller.viewport_top(), 0);
    assert_eq!(harness.controller.selection().last_selected(), None);
}
