//! Resolve command implementation

use anyhow::{Context, Result};
use pd_core::PlotRequest;
use std::path::Path;

use crate::cli::{GlobalArgs, ResolveArgs, ResolveOutput};
use crate::context::RuntimeContext;

/// Execute the resolve command
pub async fn execute(args: &ResolveArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let request = PlotRequest::load(Path::new(&args.plot))
        .with_context(|| format!("Failed to load plot request: {}", args.plot))?;

    let response = pd_resolve::resolve_plot(&ctx.client, &ctx.config, &request)
        .await
        .context("Failed to resolve plot dimensions")?;

    let rendered = match args.output {
        ResolveOutput::Json => serde_json::to_string(&response)?,
        ResolveOutput::Pretty => serde_json::to_string_pretty(&response)?,
    };
    println!("{}", rendered);

    if global.verbose {
        eprintln!(
            "[verbose] {} {} entries, {} dimensions, {} filters, {} metadata",
            response.len(),
            response.index_type,
            response.dimensions.len(),
            response.filters.len(),
            response.metadata.len()
        );
    }

    Ok(())
}
