//! Per-key fetch results, consumed by the assembler.

use pd_core::Aggregation;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// What a dimension selected, for labelling
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// A raw slice of one entity
    Entity { identifier: String },
    /// An aggregation over the members of a context
    Context {
        name: String,
        aggregation: Aggregation,
        matched: usize,
    },
}

/// Values of one dimension, keyed canonically, in reply order
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDimension {
    pub key: String,
    pub dataset_id: String,
    pub slice_type: String,
    pub selection: Selection,
    pub entries: Vec<(String, Option<f64>)>,
    /// id -> label pairs seen in the reply
    pub observed_labels: HashMap<String, String>,
}

/// Canonical keys of the index entries matching a filter
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFilter {
    pub key: String,
    pub name: String,
    pub members: HashSet<String>,
}

/// Values of one metadata slice, keyed canonically
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMetadata {
    pub key: String,
    pub label: String,
    pub slice_id: String,
    pub values: HashMap<String, Value>,
    pub observed_labels: HashMap<String, String>,
}

/// One resolved dimension, filter or metadata entry
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedSlice {
    Dimension(ResolvedDimension),
    Filter(ResolvedFilter),
    Metadata(ResolvedMetadata),
}
