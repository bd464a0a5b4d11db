//! pd-resolve - Plot dimension resolution for plotdim
//!
//! This crate resolves the dimensions, filters and metadata slices of a plot
//! against the data API and assembles them into one `CanonicalResponse`
//! indexed by a single list of entities.

pub mod assembler;
pub mod catalog;
pub mod dimension;
pub mod error;
pub mod filter;
pub mod index;
pub mod labels;
pub mod metadata;
pub mod pipeline;
pub mod slice;

pub use catalog::{Catalog, UNKNOWN_DATASET};
pub use error::{ResolveError, ResolveResult};
pub use index::{IndexResolution, IndexStrategy};
pub use pipeline::{fetch_plot_dimensions, resolve_plot, Pass};
pub use slice::ResolvedSlice;
