mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{compute, random};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    match &cli.command {
        Commands::Compute(args) => compute::run(&cli, args),
        Commands::Random(args) => random::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
