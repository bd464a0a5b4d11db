//! The canonical response: every resolved slice re-indexed onto one index.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A secondary labelling of the index (e.g. cell line display names)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexAlias {
    pub label: String,
    pub slice_id: String,
    pub values: Vec<Option<String>>,
}

/// A resolved plot axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotDimension {
    pub dataset_id: String,
    pub dataset_label: String,
    pub axis_label: String,
    pub slice_type: String,
    pub values: Vec<Option<f64>>,
}

/// A resolved filter mask
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotFilter {
    pub name: String,
    pub values: Vec<bool>,
}

/// A resolved annotation slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotMetadata {
    pub label: String,
    pub slice_id: String,
    pub values: Vec<Value>,
}

/// Result of one resolution pass
///
/// Every `values` vector is positionally aligned with `index_labels`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalResponse {
    pub index_type: String,
    pub index_labels: Vec<String>,
    pub index_aliases: Vec<IndexAlias>,
    pub dimensions: BTreeMap<String, PlotDimension>,
    pub filters: BTreeMap<String, PlotFilter>,
    pub metadata: BTreeMap<String, PlotMetadata>,
}

impl CanonicalResponse {
    /// Number of index entries
    pub fn len(&self) -> usize {
        self.index_labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_labels.is_empty()
    }

    /// Whether every value array has exactly one entry per index label
    pub fn is_aligned(&self) -> bool {
        let n = self.len();
        self.index_aliases.iter().all(|a| a.values.len() == n)
            && self.dimensions.values().all(|d| d.values.len() == n)
            && self.filters.values().all(|f| f.values.len() == n)
            && self.metadata.values().all(|m| m.values.len() == n)
    }
}
