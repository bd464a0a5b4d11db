//! pd-core - Core library for plotdim
//!
//! This crate provides the shared types of the plot dimension pipeline:
//! plot specifications, contexts, catalog descriptors, the canonical
//! response and configuration parsing.

pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod names;
mod newtype_string;
pub mod plot;
pub mod response;

pub use catalog::{Axis, DatasetDescriptor, DimensionType, Identifier};
pub use config::{Config, IndexKeying, IndexPolicy};
pub use context::{Context, EqualitySelector, SelectorKind};
pub use error::{CoreError, CoreResult};
pub use names::{DatasetId, DimensionTypeName};
pub use plot::{
    Aggregation, AxisType, DimensionSpec, FilterSpec, IdentifierType, MetadataSpec, PlotRequest,
    SliceQuery,
};
pub use response::{CanonicalResponse, IndexAlias, PlotDimension, PlotFilter, PlotMetadata};
