//! Descriptors returned by the dataset and dimension-type catalogs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a dataset matrix a dimension type lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Sample,
    Feature,
}

impl Axis {
    /// The opposite side of the matrix
    pub fn other(self) -> Axis {
        match self {
            Axis::Sample => Axis::Feature,
            Axis::Feature => Axis::Sample,
        }
    }

    /// Plural wire name (`samples` / `features`)
    pub fn plural(self) -> &'static str {
        match self {
            Axis::Sample => "samples",
            Axis::Feature => "features",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Sample => f.write_str("sample"),
            Axis::Feature => f.write_str("feature"),
        }
    }
}

/// One entry of the dataset catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    /// Canonical id
    pub id: String,

    /// Stable alias chosen at upload time
    #[serde(default)]
    pub given_id: Option<String>,

    /// Display name
    pub name: String,

    #[serde(default)]
    pub units: String,

    /// Dimension type of the columns; absent for tabular datasets
    #[serde(default)]
    pub feature_type_name: Option<String>,

    /// Dimension type of the rows
    #[serde(default)]
    pub sample_type_name: Option<String>,
}

impl DatasetDescriptor {
    /// Whether `reference` names this dataset by id or given id
    pub fn matches_id(&self, reference: &str) -> bool {
        self.id == reference
    }

    pub fn matches_given_id(&self, reference: &str) -> bool {
        self.given_id.as_deref() == Some(reference)
    }
}

/// One entry of the dimension-type catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionType {
    pub name: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub axis: Option<Axis>,
}

/// An entity known by both its id and display label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub id: String,
    pub label: String,
}
