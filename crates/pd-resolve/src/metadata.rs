//! Metadata slices: per-entity annotations that are not plotted.
//!
//! Unlike dimensions, a malformed metadata reply is fatal, and so is a slice
//! with more distinct values than can sensibly be shown as categories.

use crate::error::{ResolveError, ResolveResult};
use crate::pipeline::Pass;
use crate::slice::ResolvedMetadata;
use pd_api::{ApiError, DimensionData};
use pd_core::MetadataSpec;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Fetch and validate one metadata slice
pub async fn fetch_metadata(
    pass: &Pass<'_>,
    key: &str,
    spec: &MetadataSpec,
) -> ResolveResult<ResolvedMetadata> {
    let slice_id = spec.slice.slice_id();
    let raw = pass.client.dimension_data_raw(&spec.slice).await?;

    if !raw.get("values").is_some_and(Value::is_array) {
        log::error!(
            "Bad metadata response for '{}': slice={:?} response={}",
            key,
            spec.slice,
            raw
        );
        return Err(ResolveError::MetadataMissingValues {
            key: key.to_string(),
            slice_id,
        });
    }

    let data = DimensionData::deserialize(&*raw).map_err(|e| ApiError::Decode {
        what: format!("metadata slice {}", slice_id),
        message: e.to_string(),
    })?;

    let max = pass.config.metadata.max_distinct_values;
    let distinct = count_distinct(data.values.as_deref().unwrap_or(&[]));
    if distinct > max {
        return Err(ResolveError::TooManyMetadataValues {
            key: key.to_string(),
            slice_id,
            count: distinct,
            max,
        });
    }

    let mut values = HashMap::with_capacity(data.ids.len());
    let mut observed_labels = HashMap::new();
    for (id, label, value) in data.entries() {
        if !label.is_empty() {
            observed_labels
                .entry(id.to_string())
                .or_insert_with(|| label.to_string());
        }
        if let Some(k) = pass.strategy.key(id, label) {
            values.entry(k.to_string()).or_insert_with(|| value.clone());
        }
    }

    Ok(ResolvedMetadata {
        key: key.to_string(),
        label: spec.display_label().to_string(),
        slice_id,
        values,
        observed_labels,
    })
}

/// Number of distinct non-null values. Numbers compare by value, so `1`
/// and `1.0` are one category.
fn count_distinct(values: &[Value]) -> usize {
    values
        .iter()
        .filter(|v| !v.is_null())
        .map(DistinctKey::of)
        .collect::<HashSet<_>>()
        .len()
}

#[derive(PartialEq, Eq, Hash)]
enum DistinctKey {
    Number(u64),
    Other(String),
}

impl DistinctKey {
    fn of(value: &Value) -> Self {
        match value.as_f64() {
            // -0.0 and 0.0 are the same category
            Some(n) if n == 0.0 => DistinctKey::Number(0.0f64.to_bits()),
            Some(n) => DistinctKey::Number(n.to_bits()),
            None => DistinctKey::Other(value.to_string()),
        }
    }
}
