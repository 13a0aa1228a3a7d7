use clap::Parser;
use svcgen::cli::{run_cli, Cli};
use svcgen::logging::{init_logging, LogConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_env().verbose(cli.verbose))?;
    run_cli(cli)
}
