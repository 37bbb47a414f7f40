//! Distance metrics driving the sweep.
//!
//! The engine only ever asks two questions of a metric: where two adjacent
//! arcs meet at a given sweep position, and where (and when) three arcs
//! converge.  Everything else in the construction is metric-agnostic.

mod euclidean;

use std::fmt;
use std::str::FromStr;

use geo::Coord;

use crate::error::VoronoiError;

pub use euclidean::Euclidean;

/// Relative tolerance for degenerate configurations and sweep-coordinate
/// ties.  It is always scaled by a length taken from the input, never
/// compared against raw coordinates.
pub const EPSILON: f64 = 1e-9;

/// The point at which three arcs meet, and the sweep position at which it
/// happens.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Convergence {
    /// Sweep coordinate at which the circle through the three sites becomes
    /// tangent to the sweep line (its lowest point).
    pub y: f64,
    /// Centre of the circle through the three sites.
    pub center: Coord<f64>,
}

/// A distance metric usable by the sweep.
pub trait Metric {
    /// Short name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// x-coordinate where the arc of `left` meets the arc of `right` (in that
    /// left-to-right order) when the sweep line is at `sweep_y`.
    fn breakpoint(&self, left: Coord<f64>, right: Coord<f64>, sweep_y: f64) -> f64;

    /// Where the arcs of `a`, `b` and `c` converge, or `None` when the three
    /// sites never do (collinear or coincident).
    fn convergence(&self, a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> Option<Convergence>;
}

/// The metrics shipped with this crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MetricKind {
    #[default]
    Euclidean,
}

impl MetricKind {
    /// Every metric available by name.
    pub const ALL: [MetricKind; 1] = [MetricKind::Euclidean];

    /// Canonical name for this metric.
    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::Euclidean => "euclidean",
        }
    }

    /// Instantiate the metric.
    pub fn build(&self) -> Box<dyn Metric> {
        match self {
            MetricKind::Euclidean => Box::new(Euclidean),
        }
    }
}

impl FromStr for MetricKind {
    type Err = VoronoiError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "euclidean_2d" | "l2" => Ok(MetricKind::Euclidean),
            _ => Err(VoronoiError::UnknownMetric {
                name: name.to_string(),
                available: Self::ALL.iter().map(|kind| kind.name()).collect(),
            }),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
