use anyhow::Result;
use budgety::cli::{init_tracing, Cli};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.run()
}
