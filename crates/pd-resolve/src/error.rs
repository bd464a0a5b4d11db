//! Error types for pd-resolve

use pd_api::ApiError;
use thiserror::Error;

/// Plot dimension resolution errors
#[derive(Error, Debug)]
pub enum ResolveError {
    /// R001: An underlying data API request failed
    #[error("[R001] {0}")]
    Api(#[from] ApiError),

    /// R002: A raw slice dimension must select exactly one entity
    #[error("[R002] Dimension '{key}' is a raw slice but its context is not a single '==' comparison")]
    RawContextNotEquality { key: String },

    /// R003: The slice endpoint replied without values for a metadata slice
    #[error("[R003] Metadata '{key}' ({slice_id}): response has no 'values' field")]
    MetadataMissingValues { key: String, slice_id: String },

    /// R004: A metadata slice has too many distinct values to annotate with
    #[error("[R004] Metadata '{key}' ({slice_id}) has {count} distinct values; at most {max} are supported")]
    TooManyMetadataValues {
        key: String,
        slice_id: String,
        count: usize,
        max: usize,
    },
}

/// Result type alias for ResolveError
pub type ResolveResult<T> = Result<T, ResolveError>;
