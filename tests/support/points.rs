#![allow(dead_code)]

use geo::Coord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// `n` points uniformly distributed in `[-extent, extent]^2`.
pub fn random_points(n: usize, extent: f64, seed: u64) -> Vec<Coord<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Coord {
            x: rng.random_range(-extent..extent),
            y: rng.random_range(-extent..extent),
        })
        .collect()
}

/// A `cols` x `rows` lattice with unit spacing, each point nudged by up to
/// `jitter` so no three sites are cocircular.
pub fn jittered_grid(cols: usize, rows: usize, jitter: f64, seed: u64) -> Vec<Coord<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(cols * rows);
    for j in 0..rows {
        for i in 0..cols {
            points.push(Coord {
                x: i as f64 + rng.random_range(-jitter..=jitter),
                y: j as f64 + rng.random_range(-jitter..=jitter),
            });
        }
    }
    points
}

/// `n` points evenly spaced on a circle, rotated by `phase` radians.
pub fn circle_points(n: usize, radius: f64, phase: f64) -> Vec<Coord<f64>> {
    (0..n)
        .map(|i| {
            let theta = phase + 2.0 * PI * i as f64 / n as f64;
            Coord { x: radius * theta.cos(), y: radius * theta.sin() }
        })
        .collect()
}

/// `n` points on the horizontal line `y`, spaced `step` apart.
pub fn row_points(n: usize, y: f64, step: f64) -> Vec<Coord<f64>> {
    (0..n).map(|i| Coord { x: i as f64 * step, y }).collect()
}

pub fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
