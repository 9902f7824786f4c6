//! CLI entry point for the wave function collapse tile map generator

use clap::Parser;
use wavetile::io::cli::{Cli, Runner, init_tracing};

fn main() -> wavetile::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let runner = Runner::new(cli);
    runner.run().map(|_summary| ())
}
