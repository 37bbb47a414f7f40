//! Finalization: clip the edges still traced by the beach line, and the
//! upper ends of top-row edges, against a rectangle around the diagram.

use geo::{Coord, Rect};

use super::FortuneSweep;
use crate::diagram::{SiteId, VertexKind};
use crate::metric::EPSILON;

impl FortuneSweep {
    pub(super) fn bound(&mut self) -> Option<Rect<f64>> {
        let extent = self.diagram.extent()?;
        let rect = clip_rect(extent, self.config.bounds, self.config.margin);
        if self.config.verbose > 0 {
            eprintln!(
                "[bound] clip rectangle ({:.3}, {:.3}) - ({:.3}, {:.3})",
                rect.min().x, rect.min().y, rect.max().x, rect.max().y,
            );
        }

        let arcs = self.beach_line.inorder();
        for pair in arcs.windows(2) {
            let (left, right) = (self.beach_line.arc(pair[0]), self.beach_line.arc(pair[1]));
            let (left_he, right_he) = (left.right_half_edge, right.left_half_edge);
            let Some(point) = self.ray_exit(left.site, right.site, false, rect) else { continue };

            let vertex = self.diagram.add_vertex(point, VertexKind::Clipped);
            self.stats.clipped_vertices += 1;
            if let Some(he) = left_he { self.diagram.set_origin(he, vertex); }
            if let Some(he) = right_he { self.diagram.set_destination(he, vertex); }
        }

        for ray in std::mem::take(&mut self.open_rays) {
            let Some(point) = self.ray_exit(ray.left, ray.right, true, rect) else { continue };

            let vertex = self.diagram.add_vertex(point, VertexKind::Clipped);
            self.stats.clipped_vertices += 1;
            if self.diagram.half_edge(ray.left_half_edge).destination.is_none() {
                self.diagram.set_destination(ray.left_half_edge, vertex);
            }
            if self.diagram.half_edge(ray.right_half_edge).origin.is_none() {
                self.diagram.set_origin(ray.right_half_edge, vertex);
            }
        }

        if self.config.verbose > 0 {
            eprintln!(
                "[bound] {} clipped vertices, {} half-edges unresolved",
                self.stats.clipped_vertices,
                self.diagram.unresolved_half_edges(),
            );
        }
        Some(rect)
    }

    /// Where the edge between `left` and `right` leaves `rect`, starting from
    /// the midpoint of the two sites.  The edge runs downward (with the left
    /// site on its left) unless `upward`.
    fn ray_exit(&self, left: SiteId, right: SiteId, upward: bool, rect: Rect<f64>) -> Option<Coord<f64>> {
        let (l, r) = (self.diagram.site_point(left), self.diagram.site_point(right));
        let origin = Coord { x: (l.x + r.x) / 2.0, y: (l.y + r.y) / 2.0 };
        let direction = if upward {
            Coord { x: l.y - r.y, y: r.x - l.x }
        } else {
            Coord { x: r.y - l.y, y: l.x - r.x }
        };
        intersect_ray(rect, origin, direction)
    }
}

/// Grow the diagram extent to include `bounds`, then pad it by `margin`.
fn clip_rect(extent: Rect<f64>, bounds: Option<Rect<f64>>, margin: f64) -> Rect<f64> {
    let mut min = Coord { x: extent.min().x - margin, y: extent.min().y - margin };
    let mut max = Coord { x: extent.max().x + margin, y: extent.max().y + margin };
    if let Some(bounds) = bounds {
        min = Coord { x: min.x.min(bounds.min().x), y: min.y.min(bounds.min().y) };
        max = Coord { x: max.x.max(bounds.max().x), y: max.y.max(bounds.max().y) };
    }
    Rect::new(min, max)
}

/// First point where the ray `origin + t * direction`, `t >= 0`, meets the
/// boundary of `rect`.  `origin` must lie inside.  An axis along which the
/// ray barely moves, relative to its length, is ignored; `None` for a zero
/// direction.
fn intersect_ray(rect: Rect<f64>, origin: Coord<f64>, direction: Coord<f64>) -> Option<Coord<f64>> {
    let threshold = EPSILON * direction.x.hypot(direction.y);
    let along = |d: f64, o: f64, lo: f64, hi: f64| {
        if d > threshold {
            Some((hi - o) / d)
        } else if d < -threshold {
            Some((lo - o) / d)
        } else {
            None
        }
    };
    let tx = along(direction.x, origin.x, rect.min().x, rect.max().x);
    let ty = along(direction.y, origin.y, rect.min().y, rect.max().y);
    let t = match (tx, ty) {
        (Some(tx), Some(ty)) => tx.min(ty),
        (Some(t), None) | (None, Some(t)) => t,
        (None, None) => return None,
    };
    Some(Coord { x: origin.x + t * direction.x, y: origin.y + t * direction.y })
}
