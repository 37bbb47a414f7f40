//! Hooks for watching a sweep as it runs.

use geo::Coord;

use crate::beach_line::{ArcId, BeachLine};
use crate::diagram::{Diagram, SiteId};
use crate::event::{Event, EventId, EventKind};
use crate::metric::Metric;

/// Receives the state of the sweep after every processed event.
///
/// All methods are called synchronously from the sweep loop; nothing the
/// observer sees can be modified through it.
pub trait SweepObserver {
    fn on_event(&mut self, step: &SweepStep<'_>);

    /// A circle event surfaced after being invalidated.
    fn on_discard(&mut self, _event: &Event) {}

    /// The queue is empty and unbounded edges have been clipped.
    fn on_finish(&mut self, _diagram: &Diagram) {}
}

impl SweepObserver for () {
    fn on_event(&mut self, _step: &SweepStep<'_>) {}
}

/// Read-only view of the sweep right after an event was handled.
pub struct SweepStep<'a> {
    pub event:   &'a Event,
    pub sweep_y: f64,
    pub(super) beach_line: &'a BeachLine,
    pub(super) diagram:    &'a Diagram,
    pub(super) metric:     &'a dyn Metric,
}

/// One arc of the beach line with its current horizontal span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrontierArc {
    pub arc:    ArcId,
    pub site:   SiteId,
    pub focus:  Coord<f64>,
    pub from_x: f64,
    pub to_x:   f64,
}

impl<'a> SweepStep<'a> {
    pub fn beach_line(&self) -> &'a BeachLine { self.beach_line }

    pub fn diagram(&self) -> &'a Diagram { self.diagram }

    /// The beach line, left to right, with breakpoints evaluated at the
    /// current sweep position.
    pub fn frontier(&self) -> Vec<FrontierArc> {
        let point = |site: SiteId| self.diagram.site_point(site);
        self.beach_line.iter()
            .map(|arc| {
                let site = self.beach_line.arc(arc).site;
                let (from_x, to_x) = self.beach_line.arc_extent(arc, self.sweep_y, self.metric, point);
                FrontierArc { arc, site, focus: point(site), from_x, to_x }
            })
            .collect()
    }

    /// Edges with both endpoints known so far.
    pub fn known_edges(&self) -> Vec<(Coord<f64>, Coord<f64>)> {
        self.diagram.segments()
    }
}

/// Compact record of one event, as seen by [`EventLog`].
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub id:        EventId,
    pub y:         f64,
    /// Site for a site event, `None` for a circle event.
    pub site:      Option<SiteId>,
    /// Vertex position for a circle event.
    pub center:    Option<Coord<f64>>,
    pub discarded: bool,
    /// Arcs on the beach line once the event was handled.
    pub arcs:      usize,
}

/// Observer that records every event in processing order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self { Self::default() }

    fn entry(event: &Event, discarded: bool, arcs: usize) -> LogEntry {
        let (site, center) = match event.kind {
            EventKind::Site { site, .. } => (Some(site), None),
            EventKind::Circle { center, .. } => (None, Some(center)),
        };
        LogEntry { id: event.id, y: event.y, site, center, discarded, arcs }
    }

    pub fn processed(&self) -> impl Iterator<Item = &LogEntry> + '_ {
        self.entries.iter().filter(|e| !e.discarded)
    }
}

impl SweepObserver for EventLog {
    fn on_event(&mut self, step: &SweepStep<'_>) {
        self.entries.push(Self::entry(step.event, false, step.beach_line.len()));
    }

    fn on_discard(&mut self, event: &Event) {
        let arcs = self.entries.last().map_or(0, |e| e.arcs);
        self.entries.push(Self::entry(event, true, arcs));
    }
}
