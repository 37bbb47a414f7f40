//! File formats for driving the sweep from outside: point lists in, diagram
//! JSON out.  None of this is used by the sweep itself.

mod diagram;
mod points;

pub use diagram::{DiagramRecord, StatsRecord, VertexRecord, write_diagram};
pub use points::{dedup_points, parse_json, read_points};
