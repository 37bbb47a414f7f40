//! Diagram export.

use std::{fs::File, io::BufWriter, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::diagram::VertexKind;
use crate::sweep::{SweepStats, VoronoiOutput};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VertexRecord {
    pub x: f64,
    pub y: f64,
    /// `"convergence"` or `"clipped"`.
    pub kind: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StatsRecord {
    pub site_events: usize,
    pub circle_events_scheduled: usize,
    pub circle_events_processed: usize,
    pub circle_events_discarded: usize,
    pub invalidations: usize,
}

impl From<&SweepStats> for StatsRecord {
    fn from(stats: &SweepStats) -> Self {
        Self {
            site_events: stats.site_events,
            circle_events_scheduled: stats.circle_events_scheduled,
            circle_events_processed: stats.circle_events_processed,
            circle_events_discarded: stats.circle_events_discarded,
            invalidations: stats.invalidations,
        }
    }
}

/// JSON layout of a computed diagram.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DiagramRecord {
    pub sites: Vec<[f64; 2]>,
    pub vertices: Vec<VertexRecord>,
    /// Undirected edges as `[[x0, y0], [x1, y1]]`.
    pub segments: Vec<[[f64; 2]; 2]>,
    /// Clip rectangle as `[min_x, min_y, max_x, max_y]`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bounds: Option<[f64; 4]>,
    pub stats: StatsRecord,
}

impl From<&VoronoiOutput> for DiagramRecord {
    fn from(output: &VoronoiOutput) -> Self {
        let diagram = &output.diagram;
        Self {
            sites: diagram.sites().iter().map(|s| [s.point.x, s.point.y]).collect(),
            vertices: diagram.vertices()
                .map(|(_, v)| VertexRecord {
                    x: v.point.x,
                    y: v.point.y,
                    kind: match v.kind {
                        VertexKind::Convergence => "convergence",
                        VertexKind::Clipped => "clipped",
                    }.to_string(),
                })
                .collect(),
            segments: diagram.segments().into_iter()
                .map(|(a, b)| [[a.x, a.y], [b.x, b.y]])
                .collect(),
            bounds: output.bounds.map(|r| [r.min().x, r.min().y, r.max().x, r.max().y]),
            stats: StatsRecord::from(&output.stats),
        }
    }
}

/// Write `output` to `path` as pretty-printed JSON.
pub fn write_diagram(path: &Path, output: &VoronoiOutput) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::diagram] Failed to create output file: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &DiagramRecord::from(output))
        .with_context(|| format!("[io::diagram] Failed to write diagram to {}", path.display()))
}
