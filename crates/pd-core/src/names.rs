//! Strongly-typed names for datasets and dimension types.

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// Reference to a dataset, either its canonical id or its given id.
    pub struct DatasetId;
}

define_newtype_string! {
    /// Name of a dimension type (`depmap_model`, `gene`, `compound`, ...).
    ///
    /// Index types and slice types are both dimension type names.
    pub struct DimensionTypeName;
}
