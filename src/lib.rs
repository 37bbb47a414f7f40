#![doc = "Voronoi diagrams by Fortune's sweep"]
//!
//! ```no_run
//! use fortune_voronoi::{compute, VertexKind};
//! use geo::Coord;
//!
//! let sites = [Coord { x: 0.0, y: 0.0 }, Coord { x: 4.0, y: 0.0 }, Coord { x: 2.0, y: 4.0 }];
//! let output = compute(&sites).unwrap();
//! assert_eq!(output.diagram.count_vertices(VertexKind::Convergence), 1);
//! ```
mod beach_line;
mod diagram;
mod error;
mod event;
mod metric;
mod sweep;

pub mod io;

#[doc(inline)]
pub use beach_line::{Arc, ArcId, BeachLine};

#[doc(inline)]
pub use diagram::{Diagram, Site, SiteId, VertexData, VertexKind};

#[doc(inline)]
pub use error::VoronoiError;

#[doc(inline)]
pub use event::{Event, EventId, EventKind, compare_events};

#[doc(inline)]
pub use metric::{Convergence, EPSILON, Euclidean, Metric, MetricKind};

#[doc(inline)]
pub use sweep::{
    EventLog, FortuneSweep, FrontierArc, LogEntry, SweepConfig, SweepObserver, SweepStats, SweepStep,
    VoronoiOutput,
};

pub use planar_dcel::{FaceId, HalfEdge, HalfEdgeId, VertexId};

use geo::Coord;

/// Euclidean Voronoi diagram of `points` with default settings.
pub fn compute(points: &[Coord<f64>]) -> Result<VoronoiOutput, VoronoiError> {
    Ok(FortuneSweep::new(points, MetricKind::Euclidean)?.construct())
}

/// Voronoi diagram of `points` under the metric named `metric`.
pub fn compute_with(points: &[Coord<f64>], metric: &str, config: SweepConfig) -> Result<VoronoiOutput, VoronoiError> {
    let kind: MetricKind = metric.parse()?;
    Ok(FortuneSweep::with_config(points, kind, config)?.construct())
}
