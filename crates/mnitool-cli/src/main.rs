//! A command line tool for inspecting and exporting the assets of Duke
//! Nukem II.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    args.init_logging();
    args.run()?;
    Ok(())
}
