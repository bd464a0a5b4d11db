//! Plot configuration: the dimension, filter and metadata specifications
//! resolved by one pipeline call.

use crate::context::Context;
use crate::error::{CoreError, CoreResult};
use crate::names::{DatasetId, DimensionTypeName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// How a dimension obtains its values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisType {
    /// One entity's slice, read directly
    RawSlice,
    /// A reduction over every entity matched by a context
    Aggregated,
}

/// Reduction applied across the entities of an aggregated dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Aggregation {
    #[serde(rename = "first")]
    #[default]
    First,
    #[serde(rename = "mean")]
    Mean,
    #[serde(rename = "median")]
    Median,
    #[serde(rename = "min")]
    Min,
    #[serde(rename = "max")]
    Max,
    #[serde(rename = "25%tile")]
    Percentile25,
    #[serde(rename = "75%tile")]
    Percentile75,
}

impl Aggregation {
    /// Wire name, also the key of the matrix endpoint's reply
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::First => "first",
            Aggregation::Mean => "mean",
            Aggregation::Median => "median",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
            Aggregation::Percentile25 => "25%tile",
            Aggregation::Percentile75 => "75%tile",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One plotted axis (x, y or color)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionSpec {
    /// Dataset reference (id or given id)
    pub dataset_id: DatasetId,

    /// Raw slice or aggregation
    pub axis_type: AxisType,

    /// Entity selector; a single `==` for raw slices
    pub context: Context,

    /// Reduction for aggregated dimensions
    #[serde(default)]
    pub aggregation: Aggregation,

    /// Dimension type of the entities the context selects
    pub slice_type: DimensionTypeName,
}

/// A named boolean mask over the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub name: String,
    pub context: Context,
}

/// Kind of identifier a slice query uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierType {
    FeatureId,
    FeatureLabel,
    SampleId,
    SampleLabel,
    /// Column of a tabular dataset
    Column,
}

impl IdentifierType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierType::FeatureId => "feature_id",
            IdentifierType::FeatureLabel => "feature_label",
            IdentifierType::SampleId => "sample_id",
            IdentifierType::SampleLabel => "sample_label",
            IdentifierType::Column => "column",
        }
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address of one slice of a dataset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SliceQuery {
    pub dataset_id: DatasetId,
    pub identifier: String,
    pub identifier_type: IdentifierType,
}

impl SliceQuery {
    /// Stable textual id of the slice, `slice/{dataset}/{identifier}/{type}`
    pub fn slice_id(&self) -> String {
        format!(
            "slice/{}/{}/{}",
            self.dataset_id, self.identifier, self.identifier_type
        )
    }
}

impl fmt::Display for SliceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.slice_id())
    }
}

/// A per-entity annotation that is not plotted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataSpec {
    pub slice: SliceQuery,

    /// Display label; defaults to the slice identifier
    #[serde(default)]
    pub label: Option<String>,
}

impl MetadataSpec {
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.slice.identifier)
    }
}

/// Everything one resolution pass needs
///
/// Keys are kept in `BTreeMap`s so that iteration, and therefore index
/// ordering, does not depend on hashing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotRequest {
    pub index_type: DimensionTypeName,

    pub dimensions: BTreeMap<String, DimensionSpec>,

    #[serde(default)]
    pub filters: BTreeMap<String, FilterSpec>,

    #[serde(default)]
    pub metadata: BTreeMap<String, MetadataSpec>,
}

impl PlotRequest {
    /// Load a plot request from a YAML (or JSON) file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let request: PlotRequest =
            serde_yaml::from_str(&content).map_err(|e| CoreError::PlotRequestInvalid {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(request)
    }
}

#[cfg(test)]
#[path = "plot_test.rs"]
mod tests;
