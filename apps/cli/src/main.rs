//! Competency dataset converter CLI.
//!
//! Extracts the transformation and classification sub-datasets from the
//! full competency dataset.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
