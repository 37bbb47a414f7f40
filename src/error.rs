//! Error types for Voronoi construction.

use std::fmt;

/// Errors reported when a sweep is configured.
///
/// Degenerate geometry never produces an error: collinear triples, shared
/// sweep coordinates and stale circle predictions are all absorbed by the
/// engine itself.
#[derive(Debug, Clone, PartialEq)]
pub enum VoronoiError {
    /// A metric was requested by a name that has no implementation.
    UnknownMetric {
        name: String,
        available: Vec<&'static str>,
    },

    /// The sweep configuration is unusable (bad margin or clip rectangle).
    InvalidConfig(String),

    /// An input site has a NaN or infinite coordinate.
    NonFiniteSite { index: usize },
}

impl fmt::Display for VoronoiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoronoiError::UnknownMetric { name, available } => {
                write!(f, "unknown metric '{}', expected one of: {}", name, available.join(", "))
            }
            VoronoiError::InvalidConfig(msg) => {
                write!(f, "invalid sweep configuration: {}", msg)
            }
            VoronoiError::NonFiniteSite { index } => {
                write!(f, "site {} has a non-finite coordinate", index)
            }
        }
    }
}

impl std::error::Error for VoronoiError {}
