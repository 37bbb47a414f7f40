//! Sweep events and the order in which they are processed.
//!
//! Events are immutable once created.  A circle event whose prediction is
//! broken by a later beach-line edit is never removed from the queue;
//! instead its id is recorded in [`StaleEvents`] and the event is dropped
//! when it surfaces.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::AHashSet;
use geo::Coord;

use crate::beach_line::ArcId;
use crate::diagram::SiteId;
use crate::metric::{Convergence, EPSILON};

/// Identity of an event, assigned in creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub enum EventKind {
    /// The sweep reaches an input site.
    Site { site: SiteId, point: Coord<f64> },
    /// `arc` is predicted to shrink to nothing at `center`.
    Circle { center: Coord<f64>, arc: ArcId },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub id:   EventId,
    /// Sweep coordinate at which the event fires.
    pub y:    f64,
    pub kind: EventKind,
}

impl Event {
    #[inline] pub fn is_site(&self) -> bool { matches!(self.kind, EventKind::Site { .. }) }

    #[inline] pub fn is_circle(&self) -> bool { matches!(self.kind, EventKind::Circle { .. }) }

    /// Site events outrank circle events at the same height.
    #[inline]
    fn rank(&self) -> u8 {
        match self.kind {
            EventKind::Site { .. } => 0,
            EventKind::Circle { .. } => 1,
        }
    }
}

/// Processing order of two events: `Less` means `a` is handled before `b`.
///
/// The sweep runs from high to low `y`, so a larger `y` comes first.  Within
/// `tolerance` of each other, site events come before circle events, sites
/// at the same height go left to right, and anything still tied goes in
/// creation order.
pub fn compare_events(a: &Event, b: &Event, tolerance: f64) -> Ordering {
    if (a.y - b.y).abs() > tolerance {
        return b.y.total_cmp(&a.y);
    }
    a.rank().cmp(&b.rank())
        .then_with(|| match (&a.kind, &b.kind) {
            (EventKind::Site { point: pa, .. }, EventKind::Site { point: pb, .. }) => pa.x.total_cmp(&pb.x),
            _ => Ordering::Equal,
        })
        .then_with(|| a.id.cmp(&b.id))
}

/// Heap entry ordering events by [`compare_events`], highest priority on top.
#[derive(Debug)]
struct Queued {
    event:     Event,
    tolerance: f64,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering { compare_events(&other.event, &self.event, self.tolerance) }
}

/// Priority queue of pending events.
#[derive(Debug)]
pub struct EventQueue {
    heap: BinaryHeap<Queued>,
    next_id: usize,
    /// Height difference below which two events count as simultaneous.
    tolerance: f64,
}

impl Default for EventQueue {
    fn default() -> Self { Self::with_tolerance(EPSILON) }
}

impl EventQueue {
    /// A queue treating events closer than `tolerance` in `y` as ties.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { heap: BinaryHeap::new(), next_id: 0, tolerance }
    }

    #[inline] pub fn len(&self) -> usize { self.heap.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.heap.is_empty() }

    /// Schedule the sweep reaching `point`.
    pub fn push_site(&mut self, site: SiteId, point: Coord<f64>) -> EventId {
        self.push(point.y, EventKind::Site { site, point })
    }

    /// Schedule the collapse of `arc`.
    pub fn push_circle(&mut self, convergence: Convergence, arc: ArcId) -> EventId {
        self.push(convergence.y, EventKind::Circle { center: convergence.center, arc })
    }

    /// Remove and return the next event to process.
    pub fn pop(&mut self) -> Option<Event> {
        self.heap.pop().map(|queued| queued.event)
    }

    fn push(&mut self, y: f64, kind: EventKind) -> EventId {
        let id = EventId(self.next_id);
        self.next_id += 1;
        self.heap.push(Queued { event: Event { id, y, kind }, tolerance: self.tolerance });
        id
    }
}

/// Ids of circle events whose predictions no longer hold.
#[derive(Debug, Default)]
pub struct StaleEvents {
    ids: AHashSet<EventId>,
}

impl StaleEvents {
    pub fn new() -> Self { Self::default() }

    /// Mark `id` stale.  Returns `false` if it already was.
    #[inline] pub fn invalidate(&mut self, id: EventId) -> bool { self.ids.insert(id) }

    #[inline] pub fn is_stale(&self, id: EventId) -> bool { self.ids.contains(&id) }

    #[inline] pub fn len(&self) -> usize { self.ids.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.ids.is_empty() }
}
