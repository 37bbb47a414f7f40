pub mod dcel;

pub use dcel::{Dcel, Face, FaceChain, FaceId, HalfEdge, HalfEdgeId, Vertex, VertexId};
