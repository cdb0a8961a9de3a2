use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

use vng_cli::cli::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // stdout carries command output, so logs go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    vng_cli::commands::run(&cli, &mut out)
}
