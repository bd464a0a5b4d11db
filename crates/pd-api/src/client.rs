//! Typed endpoints of the data API

use crate::error::{ApiError, ApiResult};
use crate::transport::{Request, Transport};
use crate::wire::{ContextMembers, DimensionData, DimensionDataRequest, MatrixRequest};
use pd_core::{Axis, Context, DatasetDescriptor, DimensionType, Identifier, SliceQuery};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Client for the dataset API
///
/// Cheap to clone; all clones share one transport.
#[derive(Clone)]
pub struct DataClient {
    transport: Arc<dyn Transport>,
}

impl DataClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Full dataset catalog
    pub async fn datasets(&self) -> ApiResult<Vec<DatasetDescriptor>> {
        self.get_json("/datasets/", "dataset catalog").await
    }

    /// Full dimension-type catalog
    pub async fn dimension_types(&self) -> ApiResult<Vec<DimensionType>> {
        self.get_json("/types/dimensions", "dimension type catalog")
            .await
    }

    /// Every known entity of a dimension type
    pub async fn dimension_identifiers(&self, dimension_type: &str) -> ApiResult<Vec<Identifier>> {
        let path = endpoint(&["types", "dimensions", dimension_type, "identifiers"])?;
        self.get_json(&path, "dimension identifiers").await
    }

    /// Entities present on one axis of a dataset
    pub async fn dataset_identifiers(
        &self,
        dataset_id: &str,
        axis: Axis,
    ) -> ApiResult<Vec<Identifier>> {
        let path = endpoint(&["datasets", axis.plural(), dataset_id])?;
        self.get_json(&path, "dataset identifiers").await
    }

    /// Undecoded reply of the slice endpoint, for callers that need to
    /// report on malformed replies
    pub async fn dimension_data_raw(&self, query: &SliceQuery) -> ApiResult<Arc<Value>> {
        let body = to_body(&DimensionDataRequest::from(query))?;
        self.transport
            .send(&Request::post("/datasets/dimension/data/", body))
            .await
    }

    /// One slice of a dataset
    pub async fn dimension_data(&self, query: &SliceQuery) -> ApiResult<DimensionData> {
        let raw = self.dimension_data_raw(query).await?;
        decode(&raw, "dimension data")
    }

    /// Aggregate a dataset matrix, returning one value per id on the
    /// non-reduced axis. Entries the server could not compute are `None`.
    pub async fn matrix_aggregate(
        &self,
        dataset_id: &str,
        request: &MatrixRequest,
    ) -> ApiResult<HashMap<String, Option<f64>>> {
        let path = endpoint(&["datasets", "matrix", dataset_id, ""])?;
        let raw = self
            .transport
            .send(&Request::post(path, to_body(request)?))
            .await?;

        let key = request.aggregate.aggregation.as_str();
        let by_id = raw.get(key).ok_or_else(|| ApiError::Decode {
            what: "matrix aggregation".to_string(),
            message: format!("reply has no '{}' entry", key),
        })?;
        decode::<HashMap<String, Option<f64>>>(by_id, "matrix aggregation")
    }

    /// Entities matching a context
    pub async fn evaluate_context(&self, context: &Context) -> ApiResult<ContextMembers> {
        let body = serde_json::json!({ "context": to_body(context)? });
        let raw = self
            .transport
            .send(&Request::post("/context/evaluate/", body))
            .await?;
        decode(&raw, "context evaluation")
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> ApiResult<T> {
        let raw = self.transport.send(&Request::get(path)).await?;
        decode(&raw, what)
    }
}

/// Absolute path from segments, each percent-encoded so ids containing
/// `/`, `?` or `#` stay inside their segment. A trailing `""` segment gives
/// a trailing slash.
fn endpoint(segments: &[&str]) -> ApiResult<String> {
    let mut url = Url::parse("http://localhost/")
        .map_err(|e| ApiError::Internal(format!("endpoint base: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| ApiError::Internal("endpoint base cannot hold a path".to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.path().to_string())
}

fn to_body<T: serde::Serialize>(body: &T) -> ApiResult<Value> {
    serde_json::to_value(body).map_err(|e| ApiError::Internal(format!("request body: {}", e)))
}

fn decode<T: DeserializeOwned>(value: &Value, what: &str) -> ApiResult<T> {
    T::deserialize(value).map_err(|e| ApiError::Decode {
        what: what.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
