//! Dataset and dimension-type lookups shared by the fetchers and the assembler.

use pd_api::{ApiResult, DataClient};
use pd_core::{Axis, DatasetDescriptor, DimensionType};

/// Placeholder shown for dataset references missing from the catalog
pub const UNKNOWN_DATASET: &str = "(Unknown dataset)";

/// Dataset and dimension-type catalogs, fetched once per pass
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub datasets: Vec<DatasetDescriptor>,
    pub dimension_types: Vec<DimensionType>,
}

impl Catalog {
    /// Fetch both catalogs concurrently
    pub async fn load(client: &DataClient) -> ApiResult<Self> {
        let (datasets, dimension_types) =
            futures::try_join!(client.datasets(), client.dimension_types())?;
        Ok(Self {
            datasets,
            dimension_types,
        })
    }

    /// Find a dataset by canonical id, falling back to given id
    pub fn find_dataset(&self, reference: &str) -> Option<&DatasetDescriptor> {
        self.datasets
            .iter()
            .find(|d| d.matches_id(reference))
            .or_else(|| self.datasets.iter().find(|d| d.matches_given_id(reference)))
    }

    /// Id to send to the data API: the canonical id when known
    pub fn request_id<'a>(&'a self, reference: &'a str) -> &'a str {
        self.find_dataset(reference)
            .map(|d| d.id.as_str())
            .unwrap_or(reference)
    }

    /// Display name of a dataset, or [`UNKNOWN_DATASET`]
    pub fn dataset_label(&self, reference: &str) -> String {
        self.find_dataset(reference)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| UNKNOWN_DATASET.to_string())
    }

    /// Units of a dataset, empty when unknown
    pub fn units(&self, reference: &str) -> &str {
        self.find_dataset(reference)
            .map(|d| d.units.as_str())
            .unwrap_or("")
    }

    pub fn dimension_type(&self, name: &str) -> Option<&DimensionType> {
        self.dimension_types.iter().find(|t| t.name == name)
    }

    /// Display name of a dimension type, empty when unknown
    pub fn type_display_name(&self, name: &str) -> &str {
        self.dimension_type(name)
            .map(|t| t.display_name.as_str())
            .unwrap_or("")
    }

    /// Which matrix axis `slice_type` lives on.
    ///
    /// The dimension-type catalog decides; otherwise the dataset's sample
    /// and feature types are compared. Anything unresolved is a feature.
    pub fn axis_of(&self, slice_type: &str, dataset: Option<&DatasetDescriptor>) -> Axis {
        if let Some(axis) = self.dimension_type(slice_type).and_then(|t| t.axis) {
            return axis;
        }

        if let Some(dataset) = dataset {
            if dataset.sample_type_name.as_deref() == Some(slice_type) {
                return Axis::Sample;
            }
            if dataset.feature_type_name.as_deref() == Some(slice_type) {
                return Axis::Feature;
            }
        }

        log::warn!(
            "Could not tell whether '{}' is a sample or feature type; assuming feature",
            slice_type
        );
        Axis::Feature
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
