//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// plotdim - Resolve plot dimensions, filters and metadata onto one index
#[derive(Parser, Debug)]
#[command(name = "pd")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override config file path (default: ./plotdim.yml if present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the data API base URL
    #[arg(long, global = true, env = "PLOTDIM_API_URL")]
    pub api_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a plot request into its canonical response
    Resolve(ResolveArgs),

    /// List the dataset catalog
    Datasets(DatasetsArgs),

    /// Evaluate a context and list its members
    Context(ContextArgs),
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Plot request file (YAML or JSON)
    pub plot: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub output: ResolveOutput,
}

/// Resolve output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutput {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    Pretty,
}

/// Arguments for the datasets command
#[derive(Args, Debug)]
pub struct DatasetsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: DatasetsOutput,
}

/// Datasets output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetsOutput {
    /// Aligned columns
    Table,
    /// JSON array
    Json,
}

/// Arguments for the context command
#[derive(Args, Debug)]
pub struct ContextArgs {
    /// Context file (YAML or JSON) with name, dimension_type and expr
    pub file: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
