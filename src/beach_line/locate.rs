//! Point location on the beach line.

use geo::Coord;

use super::{ArcId, BeachLine};
use crate::diagram::SiteId;
use crate::metric::Metric;

impl BeachLine {
    /// Breakpoints bounding arc `id` when the sweep line is at `sweep_y`.
    /// The outermost arcs extend to infinity.
    pub fn arc_extent<M, P>(&self, id: ArcId, sweep_y: f64, metric: &M, point: P) -> (f64, f64)
    where
        M: Metric + ?Sized,
        P: Fn(SiteId) -> Coord<f64>,
    {
        let node = &self.nodes[id.0];
        let site = point(node.arc.site);
        let left = if node.prev.is_nil() {
            f64::NEG_INFINITY
        } else {
            metric.breakpoint(point(self.nodes[node.prev.0].arc.site), site, sweep_y)
        };
        let right = if node.next.is_nil() {
            f64::INFINITY
        } else {
            metric.breakpoint(site, point(self.nodes[node.next.0].arc.site), sweep_y)
        };
        (left, right)
    }

    /// The arc whose parabola covers `x` when the sweep line is at `sweep_y`.
    ///
    /// Breakpoints are recomputed from the stored sites at every step.  A
    /// point exactly on a breakpoint belongs to whichever of the two arcs
    /// the descent reaches first.  Returns `None` only for an empty line.
    pub fn locate_arc_above<M, P>(&self, x: f64, sweep_y: f64, metric: &M, point: P) -> Option<ArcId>
    where
        M: Metric + ?Sized,
        P: Fn(SiteId) -> Coord<f64>,
    {
        let mut node = self.root;
        let mut last = None;
        while !node.is_nil() {
            last = Some(node);
            let (left, right) = self.arc_extent(node, sweep_y, metric, &point);
            if x < left {
                node = self.nodes[node.0].left;
            } else if x > right {
                node = self.nodes[node.0].right;
            } else {
                return Some(node);
            }
        }
        // Only reachable if rounding made neighbouring breakpoints cross.
        last
    }
}
