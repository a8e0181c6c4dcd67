use anyhow::Result;
use clap::Parser;
use strategy_spectrum::cli::{commands, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::execute(cli)
}
