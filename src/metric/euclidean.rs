use geo::Coord;

use super::{Convergence, Metric, EPSILON};

/// The ordinary Euclidean distance in the plane.
#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

impl Metric for Euclidean {
    fn name(&self) -> &'static str { "euclidean" }

    fn breakpoint(&self, left: Coord<f64>, right: Coord<f64>, sweep_y: f64) -> f64 {
        let (x1, y1) = (left.x, left.y);
        let (x2, y2) = (right.x, right.y);

        // Ties are judged against the size of the configuration, so the
        // result does not depend on the units of the input.
        let tolerance = EPSILON * (x2 - x1).abs().max((y1 - sweep_y).abs()).max((y2 - sweep_y).abs());

        // A focus on the directrix degenerates into a vertical ray at its x.
        let on_left = (y1 - sweep_y).abs() <= tolerance;
        let on_right = (y2 - sweep_y).abs() <= tolerance;
        match (on_left, on_right) {
            (true, true) => return 0.5 * (x1 + x2),
            (true, false) => return x1,
            (false, true) => return x2,
            (false, false) => {}
        }

        // Congruent parabolas meet on the perpendicular bisector.
        if (y1 - y2).abs() <= tolerance {
            return 0.5 * (x1 + x2);
        }

        let d1 = 0.5 / (y1 - sweep_y);
        let d2 = 0.5 / (y2 - sweep_y);

        let a = d1 - d2;
        let b = 2.0 * (d2 * x2 - d1 * x1);
        let c = (x1 * x1 + y1 * y1 - sweep_y * sweep_y) * d1
              - (x2 * x2 + y2 * y2 - sweep_y * sweep_y) * d2;

        let root = (b * b - 4.0 * a * c).max(0.0).sqrt();

        // Same root either way; pick the form without cancellation.
        if b > 0.0 { 2.0 * c / (-b - root) } else { (-b + root) / (2.0 * a) }
    }

    fn convergence(&self, a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> Option<Convergence> {
        // Work relative to `a`; the circumcenter is translation invariant.
        let (bx, by) = (b.x - a.x, b.y - a.y);
        let (cx, cy) = (c.x - a.x, c.y - a.y);

        // Twice the signed area, compared against the product of two side
        // lengths: the sine of the angle at `b`, up to sign.
        let cross = bx * cy - by * cx;
        let sides = bx.hypot(by) * (c.x - b.x).hypot(c.y - b.y);
        if cross.abs() <= EPSILON * sides {
            return None;
        }

        let denominator = 2.0 * cross;
        let (b2, c2) = (bx * bx + by * by, cx * cx + cy * cy);
        let offset = Coord {
            x: (cy * b2 - by * c2) / denominator,
            y: (bx * c2 - cx * b2) / denominator,
        };
        let center = Coord { x: a.x + offset.x, y: a.y + offset.y };
        let radius = offset.x.hypot(offset.y);

        Some(Convergence { y: center.y - radius, center })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> { Coord { x, y } }

    /// Height of the parabola with focus `site` and directrix `sweep_y` at `x`.
    fn parabola_y(site: Coord<f64>, sweep_y: f64, x: f64) -> f64 {
        let p = site.y - sweep_y;
        (x - site.x).powi(2) / (2.0 * p) + 0.5 * (site.y + sweep_y)
    }

    #[test]
    fn breakpoint_side_follows_argument_order() {
        let high = c(0.0, 2.0);
        let low = c(0.0, 1.0);
        let left = Euclidean.breakpoint(high, low, 0.0);
        let right = Euclidean.breakpoint(low, high, 0.0);
        assert!((left + 2f64.sqrt()).abs() < 1e-12, "left = {left}");
        assert!((right - 2f64.sqrt()).abs() < 1e-12, "right = {right}");
    }

    #[test]
    fn breakpoint_lies_on_both_parabolas() {
        let cases = [
            (c(0.0, 5.0), c(3.0, 2.0), -1.0),
            (c(-2.0, 1.0), c(4.0, 3.5), 0.25),
            (c(1.0, 10.0), c(1.5, 9.99), 0.0),
        ];
        for (left, right, sweep_y) in cases {
            let x = Euclidean.breakpoint(left, right, sweep_y);
            let (yl, yr) = (parabola_y(left, sweep_y, x), parabola_y(right, sweep_y, x));
            assert!((yl - yr).abs() < 1e-6 * yl.abs().max(1.0), "{left:?} {right:?}: {yl} vs {yr}");
        }
    }

    #[test]
    fn breakpoint_degenerate_cases() {
        // Equal heights meet on the bisector.
        assert_eq!(Euclidean.breakpoint(c(0.0, 3.0), c(4.0, 3.0), 1.0), 2.0);
        // A focus on the sweep line is a vertical ray.
        assert_eq!(Euclidean.breakpoint(c(0.0, 3.0), c(1.0, 0.0), 0.0), 1.0);
        assert_eq!(Euclidean.breakpoint(c(1.0, 0.0), c(0.0, 3.0), 0.0), 1.0);
        // Both on the sweep line.
        assert_eq!(Euclidean.breakpoint(c(0.0, 0.0), c(1.0, 0.0), 0.0), 0.5);
    }

    #[test]
    fn convergence_is_circumcircle_bottom() {
        let conv = Euclidean.convergence(c(0.0, 0.0), c(2.0, 4.0), c(4.0, 0.0)).unwrap();
        assert!((conv.center.x - 2.0).abs() < 1e-12);
        assert!((conv.center.y - 1.5).abs() < 1e-12);
        assert!((conv.y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn convergence_does_not_depend_on_scale() {
        for scale in [1e-6, 1e-4, 1e-3, 1.0, 1e3, 1e6] {
            let conv = Euclidean
                .convergence(c(0.0, 0.0), c(2.0 * scale, 4.0 * scale), c(4.0 * scale, 0.0))
                .unwrap_or_else(|| panic!("no convergence at scale {scale}"));
            assert!((conv.center.x / scale - 2.0).abs() < 1e-9, "scale {scale}: {conv:?}");
            assert!((conv.center.y / scale - 1.5).abs() < 1e-9, "scale {scale}: {conv:?}");
            assert!((conv.y / scale + 1.0).abs() < 1e-9, "scale {scale}: {conv:?}");
        }
        // A thin but proper triangle far from the origin.
        let conv = Euclidean.convergence(c(1e6, 1e6), c(1e6 + 1e-3, 1e6 + 1e-3), c(1e6 + 2e-3, 1e6)).unwrap();
        assert!((conv.center.x - (1e6 + 1e-3)).abs() < 1e-8, "{conv:?}");
        assert!((conv.center.y - 1e6).abs() < 1e-8, "{conv:?}");
    }

    #[test]
    fn breakpoint_does_not_depend_on_scale() {
        for scale in [1e-6, 1e-4, 1.0, 1e4] {
            let x = Euclidean.breakpoint(c(0.0, 2.0 * scale), c(0.0, scale), 0.0);
            assert!((x / scale + 2f64.sqrt()).abs() < 1e-9, "scale {scale}: {x}");
            // The general case scales linearly.
            let x = Euclidean.breakpoint(c(-2.0 * scale, 1.0 * scale), c(4.0 * scale, 3.5 * scale), 0.25 * scale);
            let expected = Euclidean.breakpoint(c(-2.0, 1.0), c(4.0, 3.5), 0.25);
            assert!((x / scale - expected).abs() < 1e-9, "scale {scale}: {x} vs {expected}");
        }
    }

    #[test]
    fn convergence_rejects_collinear_and_coincident() {
        assert!(Euclidean.convergence(c(0.0, 0.0), c(1.0, 0.0), c(2.0, 0.0)).is_none());
        assert!(Euclidean.convergence(c(0.0, 0.0), c(1.0, 1.0), c(3.0, 3.0)).is_none());
        assert!(Euclidean.convergence(c(1.0, 2.0), c(0.0, 0.0), c(1.0, 2.0)).is_none());
        assert!(Euclidean.convergence(c(0.0, 0.0), c(1e-5, 0.0), c(2e-5, 0.0)).is_none());
    }
}
