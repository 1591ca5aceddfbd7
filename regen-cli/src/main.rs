//! Regen CLI - Command line tool for rainfall series statistics.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "regen-cli",
    version,
    about = "Rainfall series cache and sliding-window statistics toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: regen_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    regen_cmd::run(cli.command)
}
