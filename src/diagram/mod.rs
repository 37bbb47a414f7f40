//! The Voronoi diagram as a planar subdivision: one face per site, vertices
//! where cells meet, and directed half-edges along cell boundaries.
//!
//! The diagram is the only place vertices, half-edges and faces are
//! allocated.  Nothing is deleted; the sweep fills in missing endpoints and
//! boundary links as it goes.

mod locate;

use std::fmt;
use std::sync::OnceLock;

use ahash::AHashSet;
use geo::{Coord, Rect};
use planar_dcel::{Dcel, FaceId, HalfEdge, HalfEdgeId, VertexId};
use rstar::primitives::GeomWithData;
use rstar::RTree;

/// Index of an input site (its position in the input slice).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteId(pub usize);

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SiteId({})", self.0)
    }
}

/// How a vertex came to exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexKind {
    /// Three arcs converged here (a circle event).
    Convergence,
    /// An unbounded edge was cut off by the clip rectangle.
    Clipped,
}

/// Position and origin of a diagram vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexData {
    pub point: Coord<f64>,
    pub kind:  VertexKind,
}

/// An input point and the face it owns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Site {
    pub point: Coord<f64>,
    pub face:  FaceId,
}

type SiteEntry = GeomWithData<[f64; 2], usize>;

#[derive(Clone, Debug)]
pub struct Diagram {
    sites: Vec<Site>,
    dcel:  Dcel<VertexData, SiteId>,
    /// Nearest-site index, built on first query.
    index: OnceLock<RTree<SiteEntry>>,
}

impl Diagram {
    /// Create a diagram with one empty face per point.
    pub fn new(points: &[Coord<f64>]) -> Self {
        let mut dcel = Dcel::new();
        let sites = points.iter().enumerate()
            .map(|(i, &point)| Site { point, face: dcel.add_face(SiteId(i)) })
            .collect();
        Self { sites, dcel, index: OnceLock::new() }
    }

    // -----------------------------------------------------------------------
    // Sites and faces
    // -----------------------------------------------------------------------

    #[inline] pub fn num_sites(&self) -> usize { self.sites.len() }

    #[inline] pub fn sites(&self) -> &[Site] { &self.sites }

    #[inline] pub fn site(&self, id: SiteId) -> &Site { &self.sites[id.0] }

    #[inline] pub fn site_point(&self, id: SiteId) -> Coord<f64> { self.sites[id.0].point }

    /// The site owning `face`.
    #[inline] pub fn face_site(&self, face: FaceId) -> SiteId { self.dcel.face(face).data }

    /// All half-edges assigned to the face of `site`, in allocation order.
    #[inline]
    pub fn face_half_edges(&self, site: SiteId) -> &[HalfEdgeId] {
        &self.dcel.face(self.sites[site.0].face).half_edges
    }

    // -----------------------------------------------------------------------
    // Vertices and half-edges
    // -----------------------------------------------------------------------

    #[inline] pub fn num_vertices(&self) -> usize { self.dcel.num_vertices() }

    #[inline] pub fn num_half_edges(&self) -> usize { self.dcel.num_half_edges() }

    #[inline] pub fn vertex(&self, id: VertexId) -> &VertexData { &self.dcel.vertex(id).coords }

    /// Iterate over all vertices in creation order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &VertexData)> + '_ {
        self.dcel.vertices.iter().enumerate().map(|(i, v)| (VertexId(i), &v.coords))
    }

    #[inline] pub fn half_edge(&self, id: HalfEdgeId) -> &HalfEdge { self.dcel.half_edge(id) }

    /// Iterate over all half-edges in creation order.
    pub fn half_edges(&self) -> impl Iterator<Item = (HalfEdgeId, &HalfEdge)> + '_ {
        self.dcel.half_edges.iter().enumerate().map(|(i, he)| (HalfEdgeId(i), he))
    }

    /// Number of vertices of the given kind.
    pub fn count_vertices(&self, kind: VertexKind) -> usize {
        self.dcel.vertices.iter().filter(|v| v.coords.kind == kind).count()
    }

    /// Place a vertex.  Vertices are never moved or removed.
    pub fn add_vertex(&mut self, point: Coord<f64>, kind: VertexKind) -> VertexId {
        self.dcel.add_vertex(VertexData { point, kind })
    }

    /// Allocate a half-edge on the face of `site` with both ends unset.
    pub fn add_half_edge(&mut self, site: SiteId) -> HalfEdgeId {
        let face = self.sites[site.0].face;
        self.dcel.add_half_edge(face)
    }

    pub(crate) fn set_twins(&mut self, a: HalfEdgeId, b: HalfEdgeId) { self.dcel.set_twins(a, b) }

    pub(crate) fn set_origin(&mut self, he: HalfEdgeId, vertex: VertexId) { self.dcel.set_origin(he, vertex) }

    pub(crate) fn set_destination(&mut self, he: HalfEdgeId, vertex: VertexId) {
        self.dcel.set_destination(he, vertex)
    }

    pub(crate) fn set_next(&mut self, he: HalfEdgeId, next: HalfEdgeId) { self.dcel.set_next(he, next) }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    fn endpoints(&self, he: &HalfEdge) -> Option<(Coord<f64>, Coord<f64>)> {
        Some((self.vertex(he.origin?).point, self.vertex(he.destination?).point))
    }

    /// `(origin, destination)` for every half-edge with both ends resolved.
    /// Each edge appears once per direction.
    pub fn edges(&self) -> Vec<(Coord<f64>, Coord<f64>)> {
        self.dcel.half_edges.iter().filter_map(|he| self.endpoints(he)).collect()
    }

    /// One `(origin, destination)` pair per resolved edge, taking the
    /// lower-numbered half-edge of each twin pair.
    pub fn segments(&self) -> Vec<(Coord<f64>, Coord<f64>)> {
        self.half_edges()
            .filter(|(id, he)| he.twin.is_none_or(|twin| id.0 < twin.0))
            .filter_map(|(_, he)| self.endpoints(he))
            .collect()
    }

    /// Number of half-edges still missing an endpoint.
    pub fn unresolved_half_edges(&self) -> usize {
        self.dcel.half_edges.iter().filter(|he| !he.is_resolved()).count()
    }

    /// Bounding rectangle of every site and vertex, if there are any.
    pub fn extent(&self) -> Option<Rect<f64>> {
        self.sites.iter().map(|s| s.point)
            .chain(self.dcel.vertices.iter().map(|v| v.coords.point))
            .map(|c| Rect::new(c, c))
            .reduce(|a, b| Rect::new(
                Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            ))
    }

    // -----------------------------------------------------------------------
    // Cells
    // -----------------------------------------------------------------------

    /// Boundary chains of the cell of `site`, each in traversal order.
    ///
    /// A bounded cell has one closed chain and a clipped cell one chain
    /// running from the clip rectangle back to it.  The strip between two
    /// parallel edges of a collinear input has one chain per side.  Chains
    /// are ordered by their earliest allocated half-edge.
    pub fn face_chains(&self, site: SiteId) -> Vec<Vec<HalfEdgeId>> {
        let mut seen = AHashSet::new();
        let mut chains = Vec::new();
        for &he in self.face_half_edges(site) {
            if seen.contains(&he) { continue }
            let chain: Vec<_> = self.dcel.face_chain(he).collect();
            seen.extend(chain.iter().copied());
            chains.push(chain);
        }
        chains
    }

    /// Every boundary half-edge of the cell of `site`: the chains of
    /// [`face_chains`](Self::face_chains) one after another.
    pub fn face_boundary(&self, site: SiteId) -> Vec<HalfEdgeId> {
        self.face_chains(site).into_iter().flatten().collect()
    }

    /// Returns `true` if the boundary of `site` closes on itself.
    pub fn is_bounded(&self, site: SiteId) -> bool {
        self.dcel.face(self.sites[site.0].face).half_edge
            .is_some_and(|entry| self.dcel.is_closed_chain(entry))
    }

    /// Vertex ring of the cell of `site`: the origin of every boundary
    /// half-edge, plus the final destination of each open chain.  Open
    /// chains are joined by straight segments along the clip rectangle.
    /// Unresolved ends are skipped.
    pub fn cell_polygon(&self, site: SiteId) -> Vec<Coord<f64>> {
        let mut ring = Vec::new();
        for chain in self.face_chains(site) {
            ring.extend(chain.iter()
                .filter_map(|&he| self.half_edge(he).origin)
                .map(|v| self.vertex(v).point));
            let open = chain.first().is_some_and(|&he| !self.dcel.is_closed_chain(he));
            if let Some(v) = chain.last().filter(|_| open).and_then(|&he| self.half_edge(he).destination) {
                ring.push(self.vertex(v).point);
            }
        }
        ring
    }
}
