//! Fortune's sweep: the event loop that drives the beach line and builds
//! the diagram.
//!
//! The sweep line moves from high to low `y`.  Each event is handled to
//! completion before the next one is popped; circle events invalidated by
//! an earlier edit are dropped when they surface.  Once the queue is empty
//! the edges that are still unbounded are clipped against a rectangle that
//! contains every site and vertex.

mod bound;
mod handlers;
mod observer;

use geo::{Coord, Rect};
use planar_dcel::HalfEdgeId;

use crate::beach_line::BeachLine;
use crate::diagram::{Diagram, SiteId};
use crate::error::VoronoiError;
use crate::event::{Event, EventKind, EventQueue, StaleEvents};
use crate::metric::{EPSILON, Metric, MetricKind};

pub use observer::{EventLog, FrontierArc, LogEntry, SweepObserver, SweepStep};

/// Tunables for a sweep.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepConfig {
    /// Gap kept between the clip rectangle and every site or vertex.
    pub margin: f64,
    /// Rectangle the clip rectangle is grown from.  It never shrinks below
    /// this.
    pub bounds: Option<Rect<f64>>,
    /// Progress output on stderr: 0 = silent, 1 = summary, 2 = per event.
    pub verbose: u8,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self { margin: 0.5, bounds: None, verbose: 0 }
    }
}

impl SweepConfig {
    fn validate(&self) -> Result<(), VoronoiError> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(VoronoiError::InvalidConfig(format!("margin must be finite and non-negative, got {}", self.margin)));
        }
        if let Some(bounds) = self.bounds {
            let corners = [bounds.min().x, bounds.min().y, bounds.max().x, bounds.max().y];
            if corners.iter().any(|c| !c.is_finite()) {
                return Err(VoronoiError::InvalidConfig("clip bounds must be finite".to_string()));
            }
        }
        Ok(())
    }
}

/// Counters describing one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub site_events:             usize,
    pub circle_events_scheduled: usize,
    pub circle_events_processed: usize,
    /// Circle events dropped at pop time because they had gone stale.
    pub circle_events_discarded: usize,
    /// Distinct circle events marked stale.
    pub invalidations:           usize,
    pub convergence_vertices:    usize,
    pub clipped_vertices:        usize,
    /// Largest number of arcs on the beach line at any time.
    pub max_beach_line:          usize,
}

/// Result of a completed sweep.
#[derive(Clone, Debug)]
pub struct VoronoiOutput {
    pub diagram: Diagram,
    pub stats:   SweepStats,
    /// Rectangle unbounded edges were clipped to; `None` without sites.
    pub bounds:  Option<Rect<f64>>,
}

/// An edge between two top-row sites.  Besides its lower end, which the
/// beach line closes, it also runs to infinity upwards.
#[derive(Clone, Copy, Debug)]
struct OpenRay {
    left:            SiteId,
    right:           SiteId,
    left_half_edge:  HalfEdgeId,
    right_half_edge: HalfEdgeId,
}

/// State of one Fortune sweep over a fixed set of sites.
pub struct FortuneSweep {
    metric:     Box<dyn Metric>,
    config:     SweepConfig,
    diagram:    Diagram,
    beach_line: BeachLine,
    queue:      EventQueue,
    stale:      StaleEvents,
    open_rays:  Vec<OpenRay>,
    sweep_y:    f64,
    /// Absolute tolerance for ties, scaled to the extent of the sites.
    tolerance:  f64,
    stats:      SweepStats,
}

impl std::fmt::Debug for FortuneSweep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FortuneSweep")
            .field("metric", &self.metric.name())
            .field("config", &self.config)
            .field("diagram", &self.diagram)
            .field("beach_line", &self.beach_line)
            .field("queue", &self.queue)
            .field("stale", &self.stale)
            .field("open_rays", &self.open_rays)
            .field("sweep_y", &self.sweep_y)
            .field("tolerance", &self.tolerance)
            .field("stats", &self.stats)
            .finish()
    }
}

impl FortuneSweep {
    /// Prepare a sweep with one of the built-in metrics and default settings.
    pub fn new(points: &[Coord<f64>], metric: MetricKind) -> Result<Self, VoronoiError> {
        Self::with_metric(points, metric.build(), SweepConfig::default())
    }

    /// Prepare a sweep with one of the built-in metrics.
    pub fn with_config(points: &[Coord<f64>], metric: MetricKind, config: SweepConfig) -> Result<Self, VoronoiError> {
        Self::with_metric(points, metric.build(), config)
    }

    /// Prepare a sweep with a caller-supplied metric.
    pub fn with_metric(points: &[Coord<f64>], metric: Box<dyn Metric>, config: SweepConfig) -> Result<Self, VoronoiError> {
        config.validate()?;
        if let Some(index) = points.iter().position(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(VoronoiError::NonFiniteSite { index });
        }

        let tolerance = EPSILON * length_scale(points);
        let diagram = Diagram::new(points);
        let mut queue = EventQueue::with_tolerance(tolerance);
        for (i, &point) in points.iter().enumerate() {
            queue.push_site(SiteId(i), point);
        }

        Ok(Self {
            metric,
            config,
            diagram,
            beach_line: BeachLine::new(),
            queue,
            stale: StaleEvents::new(),
            open_rays: Vec::new(),
            sweep_y: f64::INFINITY,
            tolerance,
            stats: SweepStats::default(),
        })
    }

    /// Height difference below which two events count as simultaneous.
    pub fn tolerance(&self) -> f64 { self.tolerance }

    /// Name of the metric in use.
    pub fn metric_name(&self) -> &'static str { self.metric.name() }

    /// Run the sweep to completion.
    pub fn construct(self) -> VoronoiOutput {
        self.construct_observed(&mut ())
    }

    /// Run the sweep to completion, reporting every processed event to
    /// `observer`.
    pub fn construct_observed(mut self, observer: &mut dyn SweepObserver) -> VoronoiOutput {
        let verbose = self.config.verbose;
        if verbose > 0 {
            eprintln!("[sweep] {} sites, metric={}", self.diagram.num_sites(), self.metric.name());
        }

        while let Some(event) = self.queue.pop() {
            if self.stale.is_stale(event.id) {
                self.stats.circle_events_discarded += 1;
                if verbose > 1 { eprintln!("[sweep] y={:.6} discard stale {:?}", event.y, event.id); }
                observer.on_discard(&event);
                continue;
            }
            self.process(&event);
            self.stats.max_beach_line = self.stats.max_beach_line.max(self.beach_line.len());

            observer.on_event(&SweepStep {
                event: &event,
                sweep_y: self.sweep_y,
                beach_line: &self.beach_line,
                diagram: &self.diagram,
                metric: &*self.metric,
            });
        }

        if verbose > 0 {
            eprintln!(
                "[sweep] {} site events, {} circle events ({} scheduled, {} discarded)",
                self.stats.site_events,
                self.stats.circle_events_processed,
                self.stats.circle_events_scheduled,
                self.stats.circle_events_discarded,
            );
        }

        let bounds = self.bound();
        observer.on_finish(&self.diagram);

        VoronoiOutput { diagram: self.diagram, stats: self.stats, bounds }
    }

    fn process(&mut self, event: &Event) {
        self.sweep_y = event.y;
        match event.kind {
            EventKind::Site { site, .. } => {
                if self.config.verbose > 1 { eprintln!("[sweep] y={:.6} site {}", event.y, site); }
                self.stats.site_events += 1;
                self.handle_site_event(site);
            }
            EventKind::Circle { center, arc } => {
                if self.config.verbose > 1 {
                    eprintln!("[sweep] y={:.6} circle {} at ({:.6}, {:.6})", event.y, arc, center.x, center.y);
                }
                self.stats.circle_events_processed += 1;
                self.handle_circle_event(center, arc);
            }
        }
    }
}

/// Characteristic length of a point set: the longer side of its bounding
/// box, or the largest coordinate when every point coincides.
fn length_scale(points: &[Coord<f64>]) -> f64 {
    let Some(&first) = points.first() else { return 1.0 };
    let (mut min, mut max) = (first, first);
    for p in points {
        min = Coord { x: min.x.min(p.x), y: min.y.min(p.y) };
        max = Coord { x: max.x.max(p.x), y: max.y.max(p.y) };
    }

    let span = (max.x - min.x).max(max.y - min.y);
    let magnitude = first.x.abs().max(first.y.abs());
    if span > 0.0 { span } else if magnitude > 0.0 { magnitude } else { 1.0 }
}
