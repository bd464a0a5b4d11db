//! Request and reply bodies of the data API

use pd_core::{Aggregation, Axis, Identifier, SliceQuery};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reply of `POST /datasets/dimension/data/`
///
/// `values` stays optional so callers can tell a missing field apart from
/// an empty slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DimensionData {
    #[serde(default)]
    pub ids: Vec<String>,

    #[serde(default)]
    pub labels: Vec<String>,

    #[serde(default)]
    pub values: Option<Vec<Value>>,
}

impl DimensionData {
    /// Iterate `(id, label, value)` triples, padding short arrays with
    /// empty labels and nulls
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &Value)> + '_ {
        static NULL: Value = Value::Null;
        let values = self.values.as_deref().unwrap_or(&[]);
        self.ids.iter().enumerate().map(move |(i, id)| {
            let label = self.labels.get(i).map(String::as_str).unwrap_or("");
            let value = values.get(i).unwrap_or(&NULL);
            (id.as_str(), label, value)
        })
    }
}

/// Body of `POST /datasets/dimension/data/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionDataRequest<'a> {
    pub dataset_id: &'a str,
    pub identifier: &'a str,
    pub identifier_type: &'a str,
}

impl<'a> From<&'a SliceQuery> for DimensionDataRequest<'a> {
    fn from(query: &'a SliceQuery) -> Self {
        Self {
            dataset_id: query.dataset_id.as_str(),
            identifier: &query.identifier,
            identifier_type: query.identifier_type.as_str(),
        }
    }
}

/// Aggregation clause of a matrix request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateClause {
    /// `samples` or `features`: the axis being reduced
    pub aggregate_by: &'static str,
    pub aggregation: Aggregation,
}

/// Body of `POST /datasets/matrix/{dataset_id}/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixRequest {
    pub feature_identifier: &'static str,
    pub sample_identifier: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples: Option<Vec<String>>,

    pub aggregate: AggregateClause,
}

impl MatrixRequest {
    /// Reduce the `ids` on `axis` with `aggregation`, addressing everything by id
    pub fn aggregate(axis: Axis, ids: Vec<String>, aggregation: Aggregation) -> Self {
        let (features, samples) = match axis {
            Axis::Feature => (Some(ids), None),
            Axis::Sample => (None, Some(ids)),
        };
        Self {
            feature_identifier: "id",
            sample_identifier: "id",
            features,
            samples,
            aggregate: AggregateClause {
                aggregate_by: axis.plural(),
                aggregation,
            },
        }
    }
}

/// Reply of `POST /context/evaluate/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ContextMembers {
    #[serde(default)]
    pub ids: Vec<String>,

    #[serde(default)]
    pub labels: Vec<String>,
}

impl ContextMembers {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Members as id/label pairs
    pub fn identifiers(&self) -> impl Iterator<Item = Identifier> + '_ {
        self.ids.iter().enumerate().map(|(i, id)| Identifier {
            id: id.clone(),
            label: self.labels.get(i).cloned().unwrap_or_default(),
        })
    }
}
