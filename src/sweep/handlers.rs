//! Site and circle event handlers.

use geo::Coord;
use planar_dcel::{HalfEdgeId, VertexId};

use super::{FortuneSweep, OpenRay};
use crate::beach_line::ArcId;
use crate::diagram::{SiteId, VertexKind};
use crate::metric::EPSILON;

impl FortuneSweep {
    #[inline]
    fn arc_point(&self, arc: ArcId) -> Coord<f64> {
        self.diagram.site_point(self.beach_line.arc(arc).site)
    }

    /// Drop the pending circle event of `arc`, if it has one.
    fn invalidate(&mut self, arc: ArcId) {
        if let Some(event) = self.beach_line.arc_mut(arc).event.take() {
            if self.stale.invalidate(event) {
                self.stats.invalidations += 1;
            }
        }
    }

    pub(super) fn handle_site_event(&mut self, site: SiteId) {
        let point = self.diagram.site_point(site);
        if self.beach_line.is_empty() {
            let arc = self.beach_line.create_arc(site);
            self.beach_line.set_root(arc);
            return;
        }

        let diagram = &self.diagram;
        let Some(above) = self.beach_line
            .locate_arc_above(point.x, point.y, &*self.metric, |s| diagram.site_point(s))
        else {
            return;
        };
        self.invalidate(above);

        // An arc whose focus is still on the sweep line is a vertical ray:
        // it cannot be split, only flanked.
        if (self.arc_point(above).y - point.y).abs() <= self.tolerance {
            self.insert_beside(above, site, point);
            return;
        }

        let (left, middle, right) = self.break_arc(above, site);

        let (left_he, middle_he) = self.add_edge(left, middle);
        // Both breakpoints of the new arc trace the same edge for now.
        self.beach_line.arc_mut(middle).right_half_edge = Some(middle_he);
        self.beach_line.arc_mut(right).left_half_edge = Some(left_he);

        if let Some(prev) = self.beach_line.prev(left) {
            self.add_event(prev, left, middle);
        }
        if let Some(next) = self.beach_line.next(right) {
            self.add_event(middle, right, next);
        }
    }

    /// Replace `arc` with three arcs: two pieces of the old one around a new
    /// arc for `site`.  The pieces keep the old outer half-edges.
    fn break_arc(&mut self, arc: ArcId, site: SiteId) -> (ArcId, ArcId, ArcId) {
        let old = self.beach_line.arc(arc).clone();

        let middle = self.beach_line.create_arc(site);
        let left = self.beach_line.create_arc(old.site);
        let right = self.beach_line.create_arc(old.site);
        self.beach_line.arc_mut(left).left_half_edge = old.left_half_edge;
        self.beach_line.arc_mut(right).right_half_edge = old.right_half_edge;

        self.beach_line.replace(arc, middle);
        self.beach_line.insert_before(middle, left);
        self.beach_line.insert_after(middle, right);
        (left, middle, right)
    }

    /// Place an arc for `site` next to `beside`, whose focus lies on the sweep
    /// line as well.  The edge between them is a vertical line with no upper
    /// end; it is recorded so finalization can clip it.
    fn insert_beside(&mut self, beside: ArcId, site: SiteId, point: Coord<f64>) {
        let arc = self.beach_line.create_arc(site);
        let (left, right) = if point.x > self.arc_point(beside).x {
            self.beach_line.insert_after(beside, arc);
            (beside, arc)
        } else {
            self.beach_line.insert_before(beside, arc);
            (arc, beside)
        };

        let (left_he, right_he) = self.add_edge(left, right);
        self.open_rays.push(OpenRay {
            left: self.beach_line.arc(left).site,
            right: self.beach_line.arc(right).site,
            left_half_edge: left_he,
            right_half_edge: right_he,
        });

        let prev = self.beach_line.prev(arc);
        let next = self.beach_line.next(arc);
        if let Some(next) = next { self.invalidate(next); }
        if let Some(prev) = prev { self.invalidate(prev); }

        if let Some(prev) = prev {
            if let Some(before) = self.beach_line.prev(prev) { self.add_event(before, prev, arc); }
        }
        if let (Some(prev), Some(next)) = (prev, next) {
            self.add_event(prev, arc, next);
        }
        if let Some(next) = next {
            if let Some(after) = self.beach_line.next(next) { self.add_event(arc, next, after); }
        }
    }

    pub(super) fn handle_circle_event(&mut self, center: Coord<f64>, arc: ArcId) {
        debug_assert!(self.beach_line.is_live(arc), "circle event for a removed arc");
        // A collapsing arc always has a neighbour on each side.
        let (Some(left), Some(right)) = (self.beach_line.prev(arc), self.beach_line.next(arc)) else {
            return;
        };

        let vertex = self.diagram.add_vertex(center, VertexKind::Convergence);
        self.stats.convergence_vertices += 1;

        self.invalidate(left);
        self.invalidate(right);
        self.remove_arc(arc, vertex, left, right);

        if let Some(before) = self.beach_line.prev(left) {
            self.add_event(before, left, right);
        }
        if let Some(after) = self.beach_line.next(right) {
            self.add_event(left, right, after);
        }
    }

    /// Take `arc` off the beach line at `vertex`.  The two edges it
    /// separated end there and a new edge between `left` and `right` starts.
    fn remove_arc(&mut self, arc: ArcId, vertex: VertexId, left: ArcId, right: ArcId) {
        let removed = self.beach_line.arc(arc).clone();
        let left_outer = self.beach_line.arc(left).right_half_edge;
        let right_outer = self.beach_line.arc(right).left_half_edge;

        if let Some(he) = left_outer { self.diagram.set_origin(he, vertex); }
        if let Some(he) = removed.left_half_edge { self.diagram.set_destination(he, vertex); }
        if let Some(he) = removed.right_half_edge { self.diagram.set_origin(he, vertex); }
        if let Some(he) = right_outer { self.diagram.set_destination(he, vertex); }

        if let (Some(incoming), Some(outgoing)) = (removed.left_half_edge, removed.right_half_edge) {
            if incoming != outgoing {
                self.diagram.set_next(incoming, outgoing);
            }
        }

        self.beach_line.delete(arc);

        let (left_he, right_he) = self.add_edge(left, right);
        self.diagram.set_destination(left_he, vertex);
        self.diagram.set_origin(right_he, vertex);
        if let Some(he) = left_outer { self.diagram.set_next(left_he, he); }
        if let Some(he) = right_outer { self.diagram.set_next(he, right_he); }
    }

    /// Start a new edge between adjacent arcs: one half-edge on each face,
    /// twinned, held by the breakpoint between them.
    fn add_edge(&mut self, left: ArcId, right: ArcId) -> (HalfEdgeId, HalfEdgeId) {
        let left_he = self.diagram.add_half_edge(self.beach_line.arc(left).site);
        let right_he = self.diagram.add_half_edge(self.beach_line.arc(right).site);
        self.diagram.set_twins(left_he, right_he);
        self.beach_line.arc_mut(left).right_half_edge = Some(left_he);
        self.beach_line.arc_mut(right).left_half_edge = Some(right_he);
        (left_he, right_he)
    }

    /// Schedule the collapse of `middle` if its breakpoints converge below
    /// the sweep line.
    fn add_event(&mut self, left: ArcId, middle: ArcId, right: ArcId) {
        let (l, m, r) = (self.arc_point(left), self.arc_point(middle), self.arc_point(right));
        let Some(convergence) = self.metric.convergence(l, m, r) else { return };
        if convergence.y > self.sweep_y + self.tolerance {
            return;
        }
        if !breakpoints_converge(l, m, r, convergence.center, self.tolerance) {
            return;
        }

        let id = self.queue.push_circle(convergence, middle);
        self.beach_line.arc_mut(middle).event = Some(id);
        self.stats.circle_events_scheduled += 1;
    }
}

/// Whether both breakpoints of the arc triple `(l, m, r)` move towards
/// `center`.
///
/// A breakpoint moves right when its left site is lower than its right
/// site.  It starts at the lower of the two sites' `x`, and must not have
/// passed `center` by more than `tolerance` in its direction of travel.
/// Besides that the triple has to turn clockwise by more than the
/// collinearity threshold, or the middle arc is growing.
pub(crate) fn breakpoints_converge(
    l: Coord<f64>,
    m: Coord<f64>,
    r: Coord<f64>,
    center: Coord<f64>,
    tolerance: f64,
) -> bool {
    let toward = |moving_right: bool, start_x: f64| {
        if moving_right { start_x < center.x + tolerance } else { start_x > center.x - tolerance }
    };

    let left_moving_right = l.y < m.y;
    let left_start = if left_moving_right { l.x } else { m.x };
    let right_moving_right = m.y < r.y;
    let right_start = if right_moving_right { m.x } else { r.x };

    let turn = (m.x - l.x) * (r.y - m.y) - (m.y - l.y) * (r.x - m.x);
    let sides = (m.x - l.x).hypot(m.y - l.y) * (r.x - m.x).hypot(r.y - m.y);
    turn < -EPSILON * sides && toward(left_moving_right, left_start) && toward(right_moving_right, right_start)
}
