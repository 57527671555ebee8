//! Deterministic synthetic traffic generator.
//!
//! Produces an initial batch of flows and then one new flow per tick. HTTP
//! flows are emitted request-first; their response arrives as an `update`
//! on the following tick.

use crate::model::{Flow, FlowId, FlowKind, FlowMessage, HttpRequest, HttpResponse};
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use std::time::{Duration, Instant};

const SEED: u64 = 0x5eed_f10e;
const HOSTS: [&str; 5] = [
    "api.example.com",
    "cdn.example.net",
    "auth.internal",
    "telemetry.example.org",
    "static.example.com",
];
const METHODS: [&str; 4] = ["GET", "GET", "POST", "PUT"];
const PATHS: [&str; 5] = ["/", "/v1/items", "/login", "/assets/app.js", "/metrics"];
const STATUSES: [u16; 5] = [200, 200, 204, 304, 404];

/// Linear congruential sequence; reproducible across runs and platforms.
#[derive(Debug, Clone)]
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[(self.next() % items.len() as u64) as usize]
    }
}

/// Synthetic flow stream.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    rng: Lcg,
    epoch: DateTime<Utc>,
    generated: u64,
    initial: usize,
    started: bool,
    rate: Option<Duration>,
    last_tick: Option<Instant>,
    awaiting_response: Vec<Flow>,
}

impl SyntheticSource {
    /// `initial` flows up front, then one per `rate` (`None` stops after the
    /// initial batch).
    pub fn new(initial: usize, rate: Option<Duration>) -> Self {
        Self {
            rng: Lcg(SEED),
            epoch: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().unwrap_or_default(),
            generated: 0,
            initial,
            started: false,
            rate,
            last_tick: None,
            awaiting_response: Vec::new(),
        }
    }

    /// Whether a later poll can still yield messages.
    pub fn is_live(&self) -> bool {
        !self.started || self.rate.is_some() || !self.awaiting_response.is_empty()
    }

    /// Messages due at `now`.
    pub fn poll_at(&mut self, now: Instant) -> Vec<FlowMessage> {
        if !self.started {
            self.started = true;
            self.last_tick = Some(now);
            return self.initial_batch();
        }

        let Some(rate) = self.rate else {
            return self.answer_pending();
        };
        let last = self.last_tick.unwrap_or(now);
        let elapsed = now.saturating_duration_since(last);
        let due = if rate.is_zero() {
            1
        } else {
            (elapsed.as_nanos() / rate.as_nanos()) as usize
        };
        if due == 0 {
            return Vec::new();
        }
        self.last_tick = Some(last + rate * due as u32);

        let mut messages = self.answer_pending();
        for _ in 0..due {
            messages.push(self.next_flow_message());
        }
        messages
    }

    /// Messages due now.
    pub fn poll(&mut self) -> Vec<FlowMessage> {
        self.poll_at(Instant::now())
    }

    fn initial_batch(&mut self) -> Vec<FlowMessage> {
        let mut flows: Vec<Flow> = (0..self.initial).map(|_| self.next_flow()).collect();
        // Initial HTTP flows are complete except the most recent one.
        let last_http = flows.iter().rposition(|f| f.kind == FlowKind::Http);
        for (i, flow) in flows.iter_mut().enumerate() {
            if flow.kind == FlowKind::Http && Some(i) != last_http {
                flow.response = Some(self.next_response());
            }
        }
        if let Some(i) = last_http {
            self.awaiting_response.push(flows[i].clone());
        }
        vec![FlowMessage::Reset { flows }]
    }

    fn answer_pending(&mut self) -> Vec<FlowMessage> {
        let pending = std::mem::take(&mut self.awaiting_response);
        pending
            .into_iter()
            .map(|mut flow| {
                flow.response = Some(self.next_response());
                FlowMessage::Update { flow }
            })
            .collect()
    }

    fn next_flow_message(&mut self) -> FlowMessage {
        let flow = self.next_flow();
        if flow.kind == FlowKind::Http {
            self.awaiting_response.push(flow.clone());
        }
        FlowMessage::Add { flow }
    }

    fn next_flow(&mut self) -> Flow {
        let n = self.generated;
        self.generated += 1;

        let kind = match self.rng.next() % 10 {
            0..=5 => FlowKind::Http,
            6 | 7 => FlowKind::Dns,
            8 => FlowKind::Tcp,
            _ => FlowKind::Udp,
        };
        let host = self.rng.pick(&HOSTS);
        let server = match kind {
            FlowKind::Dns => "10.0.0.53:53".to_string(),
            FlowKind::Http => format!("{host}:443"),
            _ => {
                let octet = self.rng.next() % 250 + 1;
                let port = 1024 + self.rng.next() % 50_000;
                format!("10.0.{}.{octet}:{port}", n % 8)
            }
        };
        let request = (kind == FlowKind::Http).then(|| HttpRequest {
            method: self.rng.pick(&METHODS).to_string(),
            host: host.to_string(),
            path: self.rng.pick(&PATHS).to_string(),
        });

        Flow {
            id: FlowId::sequential("syn", n),
            kind,
            timestamp: self.epoch + ChronoDuration::milliseconds(n as i64 * 250),
            server: Some(server),
            request,
            response: None,
        }
    }

    fn next_response(&mut self) -> HttpResponse {
        HttpResponse {
            status_code: self.rng.pick(&STATUSES),
            content_length: Some(self.rng.next() % 64_000),
        }
    }
}
