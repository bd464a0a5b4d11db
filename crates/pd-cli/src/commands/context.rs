//! Context command implementation

use anyhow::{Context as _, Result};
use pd_core::Context;
use serde::Serialize;
use std::path::Path;

use crate::cli::{ContextArgs, GlobalArgs};
use crate::context::RuntimeContext;

#[derive(Serialize)]
struct Evaluated<'a> {
    name: &'a str,
    dimension_type: &'a str,
    count: usize,
    ids: &'a [String],
    labels: &'a [String],
}

/// Execute the context command
pub async fn execute(args: &ContextArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let context = load_context(Path::new(&args.file))?;

    let members = ctx
        .client
        .evaluate_context(&context)
        .await
        .with_context(|| format!("Failed to evaluate context '{}'", context.name))?;

    let out = Evaluated {
        name: &context.name,
        dimension_type: &context.dimension_type,
        count: members.len(),
        ids: &members.ids,
        labels: &members.labels,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// Read a context from a YAML or JSON file
fn load_context(path: &Path) -> Result<Context> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read context file: {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Invalid context file: {}", path.display()))
}
