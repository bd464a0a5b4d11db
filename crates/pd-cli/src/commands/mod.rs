//! CLI command implementations

pub(crate) mod context;
pub(crate) mod datasets;
pub(crate) mod resolve;
