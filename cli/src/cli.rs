use std::path::PathBuf;

/// Voronoi diagrams from the command line (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "fortune", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Compute the diagram of a point file and write it as JSON
    Compute(ComputeArgs),

    /// Write a file of uniformly random points
    Random(RandomArgs),
}

#[derive(clap::Args, Debug)]
pub struct ComputeArgs {
    /// Input points: a JSON array of [x, y] pairs
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub points: PathBuf,

    /// Output diagram file, defaults to "./diagram.json"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Distance metric
    #[arg(short, long, default_value = "euclidean")]
    pub metric: String,

    /// Gap between the clip rectangle and the outermost site or vertex
    #[arg(long, default_value_t = 0.5)]
    pub margin: f64,

    /// Keep repeated points instead of dropping them
    #[arg(long)]
    pub keep_duplicates: bool,
}

#[derive(clap::Args, Debug)]
pub struct RandomArgs {
    /// Number of points
    #[arg(short = 'n', long)]
    pub count: usize,

    /// Seed for reproducible output; random if omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Points are drawn from [-extent, extent] on both axes
    #[arg(short, long, default_value_t = 100.0)]
    pub extent: f64,

    /// Output points file, defaults to "./points.json"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
