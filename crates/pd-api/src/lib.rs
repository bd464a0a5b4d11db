//! pd-api - Data API layer for plotdim
//!
//! This crate provides the `Transport` trait, an HTTP implementation,
//! per-invocation request memoization and the typed endpoints of the
//! dataset API.

pub mod client;
pub mod error;
pub mod http;
pub mod memo;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod transport;
pub mod wire;

pub use client::DataClient;
pub use error::{ApiError, ApiResult};
pub use http::HttpTransport;
pub use memo::MemoTransport;
pub use transport::{Method, Request, Transport};
pub use wire::{ContextMembers, DimensionData, MatrixRequest};
