use anyhow::{Context, Result};
use fortune_voronoi::io::{dedup_points, read_points, write_diagram};
use fortune_voronoi::{FortuneSweep, MetricKind, SweepConfig, VertexKind};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::ComputeArgs) -> Result<()> {
    let out_path = &args.output.clone().unwrap_or("./diagram.json".into());
    let metric: MetricKind = args.metric.parse()?;

    let mut points = read_points(&args.points)?;
    if cli.verbose > 0 { eprintln!("[compute] read {} points from {}", points.len(), args.points.display()); }
    if !args.keep_duplicates {
        let before = points.len();
        points = dedup_points(&points);
        if cli.verbose > 0 && points.len() < before {
            eprintln!("[compute] dropped {} duplicate points", before - points.len());
        }
    }

    let config = SweepConfig { margin: args.margin, verbose: cli.verbose, ..SweepConfig::default() };
    let output = FortuneSweep::with_config(&points, metric, config)
        .context("[compute] Invalid sweep input")?
        .construct();

    let diagram = &output.diagram;
    println!(
        "[compute] {} sites, {} vertices ({} clipped), {} edges",
        diagram.num_sites(),
        diagram.num_vertices(),
        diagram.count_vertices(VertexKind::Clipped),
        diagram.segments().len(),
    );

    println!("[compute] writing diagram to {}", out_path.display());
    write_diagram(out_path, &output)?;

    Ok(())
}
