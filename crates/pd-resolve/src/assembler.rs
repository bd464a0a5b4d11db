//! Response assembly
//!
//! The index is the union of every dimension's keys in first-seen order,
//! walking dimensions in key order. Every slice is then re-indexed onto it,
//! with `null` (dimensions, metadata) or `false` (filters) wherever a slice
//! has no entry.

use crate::catalog::Catalog;
use crate::index::{IndexResolution, IndexStrategy};
use crate::labels::{aggregated_axis_label, raw_axis_label};
use crate::slice::{ResolvedDimension, ResolvedSlice, Selection};
use pd_core::{CanonicalResponse, IndexAlias, PlotDimension, PlotFilter, PlotMetadata};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Build the canonical response from every resolved slice
pub fn assemble(
    strategy: &IndexStrategy,
    resolution: &IndexResolution,
    catalog: &Catalog,
    slices: Vec<ResolvedSlice>,
) -> CanonicalResponse {
    let index_labels = collect_index(&slices);

    let mut observed_labels: HashMap<&str, &str> = HashMap::new();
    for slice in &slices {
        let labels = match slice {
            ResolvedSlice::Dimension(d) => &d.observed_labels,
            ResolvedSlice::Metadata(m) => &m.observed_labels,
            ResolvedSlice::Filter(_) => continue,
        };
        for (id, label) in labels {
            observed_labels.entry(id.as_str()).or_insert(label.as_str());
        }
    }

    let mut dimensions = BTreeMap::new();
    let mut filters = BTreeMap::new();
    let mut metadata = BTreeMap::new();

    for slice in &slices {
        match slice {
            ResolvedSlice::Dimension(d) => {
                let by_key = first_values(&d.entries);
                let values = index_labels
                    .iter()
                    .map(|k| by_key.get(k.as_str()).copied().flatten())
                    .collect();
                dimensions.insert(
                    d.key.clone(),
                    PlotDimension {
                        dataset_id: d.dataset_id.clone(),
                        dataset_label: catalog.dataset_label(&d.dataset_id),
                        axis_label: axis_label(catalog, d),
                        slice_type: d.slice_type.clone(),
                        values,
                    },
                );
            }
            ResolvedSlice::Filter(f) => {
                let values = index_labels
                    .iter()
                    .map(|k| f.members.contains(k))
                    .collect();
                filters.insert(
                    f.key.clone(),
                    PlotFilter {
                        name: f.name.clone(),
                        values,
                    },
                );
            }
            ResolvedSlice::Metadata(m) => {
                let values = index_labels
                    .iter()
                    .map(|k| m.values.get(k).cloned().unwrap_or(Value::Null))
                    .collect();
                metadata.insert(
                    m.key.clone(),
                    PlotMetadata {
                        label: m.label.clone(),
                        slice_id: m.slice_id.clone(),
                        values,
                    },
                );
            }
        }
    }

    let index_aliases = match strategy.alias_label() {
        Some(label) => vec![IndexAlias {
            label: label.to_string(),
            slice_id: format!("{}/label", strategy.index_type()),
            values: index_labels
                .iter()
                .map(|id| {
                    resolution
                        .label_of(id)
                        .or_else(|| observed_labels.get(id.as_str()).copied())
                        .map(String::from)
                })
                .collect(),
        }],
        None => Vec::new(),
    };

    CanonicalResponse {
        index_type: strategy.index_type().to_string(),
        index_labels,
        index_aliases,
        dimensions,
        filters,
        metadata,
    }
}

/// Union of dimension keys in first-seen order
fn collect_index(slices: &[ResolvedSlice]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut index = Vec::new();
    for slice in slices {
        if let ResolvedSlice::Dimension(d) = slice {
            for (k, _) in &d.entries {
                if seen.insert(k.as_str()) {
                    index.push(k.clone());
                }
            }
        }
    }
    index
}

/// First value per key; later duplicates are ignored
fn first_values(entries: &[(String, Option<f64>)]) -> HashMap<&str, Option<f64>> {
    let mut by_key = HashMap::with_capacity(entries.len());
    for (k, v) in entries {
        by_key.entry(k.as_str()).or_insert(*v);
    }
    by_key
}

fn axis_label(catalog: &Catalog, dimension: &ResolvedDimension) -> String {
    let units = catalog.units(&dimension.dataset_id);
    match &dimension.selection {
        Selection::Entity { identifier } => raw_axis_label(identifier, units),
        Selection::Context {
            name,
            aggregation,
            matched,
        } => aggregated_axis_label(
            *aggregation,
            units,
            name,
            *matched,
            catalog.type_display_name(&dimension.slice_type),
        ),
    }
}

#[cfg(test)]
#[path = "assembler_test.rs"]
mod tests;
