mod commands;
mod logging;

use clap::Parser;
use eyre::Result;

use crate::commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init(&cli.log_filter());
    cli.run()
}
