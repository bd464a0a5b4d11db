//! Datasets command implementation

use anyhow::{Context, Result};
use pd_core::DatasetDescriptor;

use crate::cli::{DatasetsArgs, DatasetsOutput, GlobalArgs};
use crate::context::RuntimeContext;

/// Execute the datasets command
pub async fn execute(args: &DatasetsArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let datasets = ctx
        .client
        .datasets()
        .await
        .context("Failed to fetch dataset catalog")?;

    match args.output {
        DatasetsOutput::Table => print_table(&datasets),
        DatasetsOutput::Json => println!("{}", serde_json::to_string_pretty(&datasets)?),
    }

    Ok(())
}

fn print_table(datasets: &[DatasetDescriptor]) {
    if datasets.is_empty() {
        println!("No datasets found.");
        return;
    }

    let rows: Vec<[&str; 5]> = datasets.iter().map(row).collect();
    let headers = ["ID", "GIVEN_ID", "NAME", "UNITS", "AXES"];
    let widths: Vec<usize> = (0..headers.len())
        .map(|i| {
            rows.iter()
                .map(|r| r[i].len())
                .chain(std::iter::once(headers[i].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    print_row(&headers, &widths);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    println!("{}", separator.join("  "));
    for r in &rows {
        print_row(r, &widths);
    }

    println!();
    println!("{} datasets", datasets.len());
}

fn row(d: &DatasetDescriptor) -> [&str; 5] {
    let axes = match (&d.sample_type_name, &d.feature_type_name) {
        (Some(_), Some(_)) => "matrix",
        (Some(_), None) => "tabular",
        _ => "-",
    };
    [
        d.id.as_str(),
        d.given_id.as_deref().unwrap_or("-"),
        d.name.as_str(),
        if d.units.is_empty() { "-" } else { d.units.as_str() },
        axes,
    ]
}

fn print_row(cells: &[&str], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<w$}", c, w = *w))
        .collect();
    println!("{}", line.join("  ").trim_end());
}
