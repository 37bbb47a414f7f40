//! Doubly Connected Edge List (DCEL) for subdivisions that are built
//! incrementally, where an edge may exist long before both of its endpoints
//! are known.
//!
//! # Structure
//!
//! Every edge is represented by directed **half-edges**, normally in twin
//! pairs.  Each half-edge carries:
//!
//! * `origin`      — the vertex it leaves from, once known
//! * `destination` — the vertex it arrives at, once known
//! * `twin`        — the opposite half-edge of the same edge, if paired
//! * `next`/`prev` — neighbours along the boundary of the same face
//! * `face`        — the face this half-edge bounds
//!
//! Nothing is ever removed: vertices, half-edges and faces persist for the
//! life of the structure.  Missing endpoints and boundary links are the only
//! state that changes after allocation.
//!
//! # Indexing
//!
//! All elements are stored in flat `Vec`s and addressed by strongly-typed
//! index wrappers (`VertexId`, `HalfEdgeId`, `FaceId`).

use std::fmt;

use smallvec::SmallVec;

// ---------------------------------------------------------------------------
// Index types
// ---------------------------------------------------------------------------

macro_rules! idx {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub usize);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

idx!(VertexId);
idx!(HalfEdgeId);
idx!(FaceId);

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A vertex with an arbitrary coordinate payload `C` and one incident
/// half-edge.
#[derive(Clone, Debug)]
pub struct Vertex<C> {
    pub coords:    C,
    /// Any half-edge leaving or entering this vertex.  `None` until the
    /// vertex is used as an endpoint.
    pub half_edge: Option<HalfEdgeId>,
}

/// A directed half-edge whose endpoints may still be unknown.
#[derive(Clone, Debug)]
pub struct HalfEdge {
    /// Vertex this half-edge leaves from.  `None` while the edge is unbounded
    /// on that side.
    pub origin:      Option<VertexId>,
    /// Vertex this half-edge arrives at.  `None` while unbounded.
    pub destination: Option<VertexId>,
    /// The other half-edge of the same edge (opposite direction).
    pub twin:        Option<HalfEdgeId>,
    /// Next half-edge along the boundary of `face`.
    pub next:        Option<HalfEdgeId>,
    /// Previous half-edge along the boundary of `face`.
    pub prev:        Option<HalfEdgeId>,
    /// Face this half-edge bounds.
    pub face:        FaceId,
}

impl HalfEdge {
    /// Both endpoints are known.
    #[inline] pub fn is_resolved(&self) -> bool { self.origin.is_some() && self.destination.is_some() }
}

/// A face with a payload `F`, its entry half-edge and every half-edge that
/// has been assigned to it.
#[derive(Clone, Debug)]
pub struct Face<F> {
    pub data:       F,
    /// The first half-edge created on this face.
    pub half_edge:  Option<HalfEdgeId>,
    /// All half-edges bounding this face, in allocation order.
    pub half_edges: SmallVec<[HalfEdgeId; 8]>,
}

// ---------------------------------------------------------------------------
// DCEL
// ---------------------------------------------------------------------------

/// A Doubly Connected Edge List over vertices with coordinate type `C` and
/// faces carrying data `F`.
#[derive(Clone, Debug)]
pub struct Dcel<C, F> {
    pub vertices:   Vec<Vertex<C>>,
    pub half_edges: Vec<HalfEdge>,
    pub faces:      Vec<Face<F>>,
}

impl<C, F> Default for Dcel<C, F> {
    fn default() -> Self { Self::new() }
}

impl<C, F> Dcel<C, F> {
    /// Create an empty DCEL.
    pub fn new() -> Self {
        Self { vertices: Vec::new(), half_edges: Vec::new(), faces: Vec::new() }
    }

    // -----------------------------------------------------------------------
    // Counts
    // -----------------------------------------------------------------------

    pub fn num_vertices(&self)   -> usize { self.vertices.len() }
    pub fn num_half_edges(&self) -> usize { self.half_edges.len() }
    pub fn num_faces(&self)      -> usize { self.faces.len() }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn vertex(&self, id: VertexId) -> &Vertex<C> { &self.vertices[id.0] }

    pub fn half_edge(&self, id: HalfEdgeId)         -> &HalfEdge     { &self.half_edges[id.0] }
    pub fn half_edge_mut(&mut self, id: HalfEdgeId) -> &mut HalfEdge { &mut self.half_edges[id.0] }

    pub fn face(&self, id: FaceId) -> &Face<F> { &self.faces[id.0] }

    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    /// Add an isolated vertex with the given coordinates.
    pub fn add_vertex(&mut self, coords: C) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex { coords, half_edge: None });
        id
    }

    /// Add a new face carrying `data`.
    pub fn add_face(&mut self, data: F) -> FaceId {
        let id = FaceId(self.faces.len());
        self.faces.push(Face { data, half_edge: None, half_edges: SmallVec::new() });
        id
    }

    /// Add a half-edge bounding `face` with no endpoints, twin or links.
    pub fn add_half_edge(&mut self, face: FaceId) -> HalfEdgeId {
        let id = HalfEdgeId(self.half_edges.len());
        self.half_edges.push(HalfEdge {
            origin: None, destination: None, twin: None, next: None, prev: None, face,
        });

        let face = &mut self.faces[face.0];
        if face.half_edge.is_none() { face.half_edge = Some(id); }
        face.half_edges.push(id);
        id
    }

    /// Record `a` and `b` as the two sides of one edge.
    pub fn set_twins(&mut self, a: HalfEdgeId, b: HalfEdgeId) {
        self.half_edges[a.0].twin = Some(b);
        self.half_edges[b.0].twin = Some(a);
    }

    /// Set the origin of `he`.
    pub fn set_origin(&mut self, he: HalfEdgeId, vertex: VertexId) {
        self.half_edges[he.0].origin = Some(vertex);
        self.touch(vertex, he);
    }

    /// Set the destination of `he`.
    pub fn set_destination(&mut self, he: HalfEdgeId, vertex: VertexId) {
        self.half_edges[he.0].destination = Some(vertex);
        self.touch(vertex, he);
    }

    /// Set `he.next = next` and `next.prev = he`.
    pub fn set_next(&mut self, he: HalfEdgeId, next: HalfEdgeId) {
        self.half_edges[he.0].next   = Some(next);
        self.half_edges[next.0].prev = Some(he);
    }

    fn touch(&mut self, vertex: VertexId, he: HalfEdgeId) {
        let v = &mut self.vertices[vertex.0];
        if v.half_edge.is_none() { v.half_edge = Some(he); }
    }

    // -----------------------------------------------------------------------
    // Traversal
    // -----------------------------------------------------------------------

    /// Walk `prev` links from `he` back to the start of its boundary chain.
    /// For a closed loop this returns `he` itself.
    pub fn chain_start(&self, he: HalfEdgeId) -> HalfEdgeId {
        let mut current = he;
        // A chain can never be longer than the number of half-edges.
        for _ in 0..self.half_edges.len() {
            match self.half_edges[current.0].prev {
                Some(prev) if prev == he => return he,
                Some(prev) => current = prev,
                None => break,
            }
        }
        current
    }

    /// Iterate over the boundary chain that contains `he`, starting from its
    /// first half-edge (or from `he` itself for a closed loop).
    pub fn face_chain(&self, he: HalfEdgeId) -> FaceChain<'_, C, F> {
        let start = self.chain_start(he);
        FaceChain { dcel: self, start, current: Some(start), steps: 0 }
    }

    /// Returns `true` if the chain through `he` closes back on itself.
    pub fn is_closed_chain(&self, he: HalfEdgeId) -> bool {
        let start = self.chain_start(he);
        self.half_edges[start.0].prev.is_some()
    }
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Iterator over half-edges along a face boundary chain, following `next`.
/// Stops at the end of an open chain or just before returning to the start
/// of a closed one.
pub struct FaceChain<'a, C, F> {
    dcel:    &'a Dcel<C, F>,
    start:   HalfEdgeId,
    current: Option<HalfEdgeId>,
    steps:   usize,
}

impl<'a, C, F> Iterator for FaceChain<'a, C, F> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<HalfEdgeId> {
        let he = self.current?;
        self.steps += 1;
        self.current = self.dcel.half_edges[he.0].next
            .filter(|&next| next != self.start && self.steps < self.dcel.half_edges.len());
        Some(he)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
