//! Point readers.

use std::{fs, path::Path};

use ahash::AHashSet;
use anyhow::{Context, Result, bail};
use geo::Coord;

/// Read input sites from `path`, a JSON array of `[x, y]` pairs.
pub fn read_points(path: &Path) -> Result<Vec<Coord<f64>>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("[io::points] Failed to read points file: {}", path.display()))?;

    let points = parse_json(&text)
        .with_context(|| format!("[io::points] Failed to parse points from {}", path.display()))?;

    if let Some(i) = points.iter().position(|p| !p.x.is_finite() || !p.y.is_finite()) {
        bail!("[io::points] Point {} in {} is not finite", i, path.display());
    }
    Ok(points)
}

/// Parse a JSON array of `[x, y]` pairs.
pub fn parse_json(text: &str) -> Result<Vec<Coord<f64>>> {
    let pairs: Vec<[f64; 2]> = serde_json::from_str(text).context("expected a JSON array of [x, y] pairs")?;
    Ok(pairs.into_iter().map(|[x, y]| Coord { x, y }).collect())
}

/// Drop exact repeats of earlier points, keeping first occurrences in order.
///
/// The sweep does not handle coincident sites, so callers with untrusted
/// input should run this first.
pub fn dedup_points(points: &[Coord<f64>]) -> Vec<Coord<f64>> {
    let mut seen = AHashSet::with_capacity(points.len());
    points.iter()
        .copied()
        // Adding 0.0 folds -0.0 into 0.0.
        .filter(|p| seen.insert(((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())))
        .collect()
}
