//! Kind/direction filtering and the derived ordered view

use crate::model::{FlowId, FlowKind, Record};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Direction mode of the filter.
///
/// Only applies to directional kinds (HTTP): `Outbound` keeps flows whose
/// request is captured but whose response is not yet, `Inbound` keeps flows
/// with a response regardless of request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// No direction constraint.
    #[default]
    Both,
    /// HTTP flows with a response.
    Inbound,
    /// HTTP flows still waiting for a response.
    Outbound,
}

impl Direction {
    /// Next mode in the cycle both → inbound → outbound → both.
    pub fn cycle(&self) -> Self {
        match self {
            Direction::Both => Direction::Inbound,
            Direction::Inbound => Direction::Outbound,
            Direction::Outbound => Direction::Both,
        }
    }

    fn admits(&self, has_request: bool, has_response: bool) -> bool {
        match self {
            Direction::Both => true,
            Direction::Outbound => has_request && !has_response,
            Direction::Inbound => has_response,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Both => "Both",
            Direction::Inbound => "Inbound",
            Direction::Outbound => "Outbound",
        })
    }
}

/// Active filter: enabled kinds plus a direction mode.
///
/// The default enables every kind in both directions, which filters nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    kinds: BTreeSet<FlowKind>,
    direction: Direction,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            kinds: FlowKind::ALL.into_iter().collect(),
            direction: Direction::Both,
        }
    }
}

impl FilterSpec {
    /// Filter with an explicit kind set and direction.
    pub fn new(kinds: impl IntoIterator<Item = FlowKind>, direction: Direction) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
            direction,
        }
    }

    /// Enabled kinds, in display order.
    pub fn kinds(&self) -> impl Iterator<Item = FlowKind> + '_ {
        self.kinds.iter().copied()
    }

    /// Active direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether a kind is enabled.
    pub fn has_kind(&self, kind: FlowKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// True when this filter passes every record.
    pub fn is_identity(&self) -> bool {
        self == &Self::default()
    }

    /// Copy of this filter with one kind flipped.
    pub fn toggled(&self, kind: FlowKind) -> Self {
        let mut next = self.clone();
        if !next.kinds.remove(&kind) {
            next.kinds.insert(kind);
        }
        next
    }

    /// Copy of this filter with a different direction.
    pub fn with_direction(&self, direction: Direction) -> Self {
        Self {
            direction,
            ..self.clone()
        }
    }

    /// Whether one record passes the filter.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        let kind = record.kind();
        if !self.kinds.contains(&kind) {
            return false;
        }
        if !kind.is_directional() {
            return true;
        }
        self.direction
            .admits(record.has_request(), record.has_response())
    }
}

/// Filter records, preserving order.
///
/// Total and pure: empty input yields empty output, and the default spec
/// returns every record.
pub fn apply_filter<'a, R, I>(records: I, spec: &FilterSpec) -> Vec<&'a R>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records
        .into_iter()
        .filter(|record| spec.matches(*record))
        .collect()
}

/// Records currently eligible for display, in store order.
///
/// Derived from the full sequence and a [`FilterSpec`]; rebuilt as a whole on
/// every change, never patched in place. Holds positions into the store plus
/// an id → view index map for selection lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedView {
    positions: Vec<usize>,
    ids: Vec<FlowId>,
    index_of: HashMap<FlowId, usize>,
}

impl OrderedView {
    /// Derive the view of `records` under `spec`.
    pub fn derive<R: Record>(records: &[R], spec: &FilterSpec) -> Self {
        let mut view = Self::default();
        for (position, record) in records.iter().enumerate() {
            if spec.matches(record) {
                view.index_of.insert(record.id().clone(), view.ids.len());
                view.ids.push(record.id().clone());
                view.positions.push(position);
            }
        }
        view
    }

    /// Number of rows in the view.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when the filter matched nothing.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// View index of a record, if it passes the filter.
    pub fn index_of(&self, id: &FlowId) -> Option<usize> {
        self.index_of.get(id).copied()
    }

    /// Id of the record at a view index.
    pub fn id_at(&self, index: usize) -> Option<&FlowId> {
        self.ids.get(index)
    }

    /// Store position of the record at a view index.
    pub fn position_at(&self, index: usize) -> Option<usize> {
        self.positions.get(index).copied()
    }

    /// Ids in view order.
    pub fn ids(&self) -> &[FlowId] {
        &self.ids
    }

    /// Resolve a range of view indices to store records.
    pub fn records<'a, R>(
        &'a self,
        records: &'a [R],
        range: std::ops::Range<usize>,
    ) -> impl Iterator<Item = (usize, &'a R)> + 'a {
        let start = range.start.min(self.len());
        let range = start..range.end.clamp(start, self.len());
        self.positions[range.clone()]
            .iter()
            .zip(range)
            .filter_map(move |(&position, index)| records.get(position).map(|r| (index, r)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Flow, HttpRequest, HttpResponse};
    use chrono::{TimeZone, Utc};

    fn flow(id: &str, kind: FlowKind, request: bool, response: bool) -> Flow {
        Flow {
            id: FlowId::new(id).unwrap(),
            kind,
            timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap(),
            server: None,
            request: request.then(|| HttpRequest {
                method: "GET".to_string(),
                host: "example.com".to_string(),
                path: "/".to_string(),
            }),
            response: response.then_some(HttpResponse {
                status_code: 200,
                content_length: None,
            }),
        }
    }

    fn sample() -> Vec<Flow> {
        vec![
            flow("req-only", FlowKind::Http, true, false),
            flow("complete", FlowKind::Http, true, true),
            flow("tcp", FlowKind::Tcp, false, false),
            flow("resp-only", FlowKind::Http, false, true),
            flow("dns", FlowKind::Dns, false, false),
            flow("bare-http", FlowKind::Http, false, false),
        ]
    }

    fn ids(records: &[&Flow]) -> Vec<String> {
        records.iter().map(|f| f.id.to_string()).collect()
    }

    mod direction {
        use super::*;

        #[test]
        fn both_passes_every_http_flow() {
            let records = sample();
            let out = apply_filter(&records, &FilterSpec::default());
            assert_eq!(out.len(), records.len());
        }

        #[test]
        fn outbound_requires_request_without_response() {
            let records = sample();
            let spec = FilterSpec::default().with_direction(Direction::Outbound);
            assert_eq!(
                ids(&apply_filter(&records, &spec)),
                vec!["req-only", "tcp", "dns"]
            );
        }

        #[test]
        fn inbound_requires_response_only() {
            let records = sample();
            let spec = FilterSpec::default().with_direction(Direction::Inbound);
            assert_eq!(
                ids(&apply_filter(&records, &spec)),
                vec!["complete", "tcp", "resp-only", "dns"]
            );
        }

        #[test]
        fn cycle_visits_all_modes() {
            assert_eq!(Direction::Both.cycle(), Direction::Inbound);
            assert_eq!(Direction::Inbound.cycle(), Direction::Outbound);
            assert_eq!(Direction::Outbound.cycle(), Direction::Both);
        }
    }

    mod kinds {
        use super::*;

        #[test]
        fn disabled_kind_is_removed_regardless_of_direction() {
            let records = sample();
            let spec = FilterSpec::default().toggled(FlowKind::Http);
            assert_eq!(ids(&apply_filter(&records, &spec)), vec!["tcp", "dns"]);
        }

        #[test]
        fn toggling_twice_restores_spec() {
            let spec = FilterSpec::default();
            assert_eq!(spec.toggled(FlowKind::Udp).toggled(FlowKind::Udp), spec);
        }

        #[test]
        fn empty_kind_set_passes_nothing() {
            let records = sample();
            let spec = FilterSpec::new([], Direction::Both);
            assert!(apply_filter(&records, &spec).is_empty());
        }

        #[test]
        fn default_is_identity() {
            assert!(FilterSpec::default().is_identity());
            assert!(!FilterSpec::default().toggled(FlowKind::Dns).is_identity());
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let records: Vec<Flow> = Vec::new();
        assert!(apply_filter(&records, &FilterSpec::default()).is_empty());
    }

    mod ordered_view {
        use super::*;

        #[test]
        fn derive_maps_ids_to_view_indices() {
            let records = sample();
            let spec = FilterSpec::default().toggled(FlowKind::Http);
            let view = OrderedView::derive(&records, &spec);

            assert_eq!(view.len(), 2);
            assert_eq!(view.index_of(&FlowId::new("dns").unwrap()), Some(1));
            assert_eq!(view.index_of(&FlowId::new("complete").unwrap()), None);
            assert_eq!(view.position_at(1), Some(4));
            assert_eq!(view.id_at(0).map(FlowId::as_str), Some("tcp"));
        }

        #[test]
        fn records_resolves_window_to_store_rows() {
            let records = sample();
            let view = OrderedView::derive(&records, &FilterSpec::default());
            let rows: Vec<_> = view
                .records(&records, 2..4)
                .map(|(i, f)| (i, f.id.to_string()))
                .collect();
            assert_eq!(
                rows,
                vec![(2, "tcp".to_string()), (3, "resp-only".to_string())]
            );
        }

        #[test]
        fn records_clamps_out_of_range_windows() {
            let records = sample();
            let view = OrderedView::derive(&records, &FilterSpec::default());
            assert_eq!(view.records(&records, 4..100).count(), 2);
            assert_eq!(view.records(&records, 50..100).count(), 0);
        }
    }
}
