//! Circle-event priority queue
//!
//! A binary min-heap keyed by (predicted y, x). Removal is lazy: each
//! half-edge holds at most one live token, and heap entries whose token no
//! longer matches are discarded when they surface.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use glam::DVec2;

use crate::voronoi::halfedge::HalfEdgeId;

#[derive(Debug, Clone, Copy)]
struct Event {
    ystar: f64,
    x: f64,
    token: u64,
    half_edge: HalfEdgeId,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ystar
            .total_cmp(&other.ystar)
            .then(self.x.total_cmp(&other.x))
            .then(self.token.cmp(&other.token))
    }
}

#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    heap: BinaryHeap<Reverse<Event>>,
    live: Vec<Option<u64>>,
    next_token: u64,
    stale_skipped: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `half_edge` at `(x, ystar)`, replacing any earlier registration
    pub fn insert(&mut self, half_edge: HalfEdgeId, x: f64, ystar: f64) {
        if half_edge >= self.live.len() {
            self.live.resize(half_edge + 1, None);
        }
        let token = self.next_token;
        self.next_token += 1;
        self.live[half_edge] = Some(token);
        self.heap.push(Reverse(Event {
            ystar,
            x,
            token,
            half_edge,
        }));
    }

    /// Cancel the pending event of `half_edge`, if any
    pub fn remove(&mut self, half_edge: HalfEdgeId) {
        if let Some(slot) = self.live.get_mut(half_edge) {
            *slot = None;
        }
    }

    fn is_live(&self, event: &Event) -> bool {
        self.live.get(event.half_edge).copied().flatten() == Some(event.token)
    }

    fn discard_stale(&mut self) {
        while let Some(Reverse(top)) = self.heap.peek() {
            if self.is_live(top) {
                break;
            }
            self.heap.pop();
            self.stale_skipped += 1;
        }
    }

    /// `(x, ystar)` of the earliest live event
    pub fn min(&mut self) -> Option<DVec2> {
        self.discard_stale();
        self.heap
            .peek()
            .map(|Reverse(event)| DVec2::new(event.x, event.ystar))
    }

    /// Pop the earliest live event
    pub fn extract_min(&mut self) -> Option<HalfEdgeId> {
        self.discard_stale();
        let Reverse(event) = self.heap.pop()?;
        self.live[event.half_edge] = None;
        Some(event.half_edge)
    }

    /// Cancelled registrations dropped so far
    pub fn stale_skipped(&self) -> usize {
        self.stale_skipped
    }
}
