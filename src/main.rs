//! Command-line interface for extracting relationship graphs from an index of
//! standards documents.

use clap::Parser;

mod cli;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    Cli::parse().run()
}
