use std::{fs::File, io::BufWriter};

use anyhow::{Context, Result, ensure};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::RandomArgs) -> Result<()> {
    ensure!(args.extent.is_finite() && args.extent > 0.0, "[random] extent must be positive, got {}", args.extent);
    let out_path = &args.output.clone().unwrap_or("./points.json".into());

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    if cli.verbose > 0 { eprintln!("[random] seed={seed}"); }
    let mut rng = StdRng::seed_from_u64(seed);

    let points: Vec<[f64; 2]> = (0..args.count)
        .map(|_| [rng.random_range(-args.extent..args.extent), rng.random_range(-args.extent..args.extent)])
        .collect();

    println!("[random] writing {} points to {}", points.len(), out_path.display());
    let file = File::create(out_path)
        .with_context(|| format!("[random] Failed to create output file: {}", out_path.display()))?;
    serde_json::to_writer(BufWriter::new(file), &points)
        .with_context(|| format!("[random] Failed to write points to {}", out_path.display()))?;

    Ok(())
}
