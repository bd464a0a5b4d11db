//! plotdim CLI - resolve plot dimensions against a dataset API

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::Cli;
use commands::{context as context_cmd, datasets, resolve};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match &cli.command {
        cli::Commands::Resolve(args) => resolve::execute(args, &cli.global).await,
        cli::Commands::Datasets(args) => datasets::execute(args, &cli.global).await,
        cli::Commands::Context(args) => context_cmd::execute(args, &cli.global).await,
    }
}

/// `debug` under `--verbose`, `warn` otherwise; `RUST_LOG` wins
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
