//! Query planning, normalization, and derivation of DynamoDB metrics.
mod derive;
mod expand;
mod normalize;
mod types;
mod window;


pub use derive::{derive, ratio_percent};
pub use expand::expand;
pub use normalize::normalize;
pub use types::{
    DataPoint, Dimension, DimensionSet, GSI_TAG, PointKey, ResourceId, Scope, SecondaryIndexSet,
};
pub use window::{DEFAULT_PERIOD, QueryWindow, WINDOW_PERIODS, query_start};
