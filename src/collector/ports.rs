use async_trait::async_trait;

use crate::catalog::{Statistic, Unit};
use crate::error::AppResult;
use crate::metrics::{DataPoint, DimensionSet, QueryWindow, ResourceId};

/// One concrete time-series query.
#[derive(Debug, Clone, Copy)]
pub struct MetricQuery<'query> {
    pub namespace: &'static str,
    pub metric_name: &'static str,
    pub statistic: Statistic,
    pub unit: Unit,
    pub window: QueryWindow,
    pub dimensions: &'query DimensionSet,
}

/// Time-series backend.
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// `Ok(None)` means the window held no datapoints.
    ///
    /// # Errors
    ///
    /// Returns an error when the query itself fails (transport, auth,
    /// throttling). Callers treat that as missing data for this one query.
    async fn query_metric(&self, query: &MetricQuery<'_>) -> AppResult<Option<f64>>;
}

/// Enumerates tables and their secondary indexes.
#[async_trait]
pub trait ResourceDiscovery: Send + Sync {
    /// # Errors
    ///
    /// Returns an error when tables cannot be listed.
    async fn list_resources(&self) -> AppResult<Vec<ResourceId>>;

    /// # Errors
    ///
    /// Returns an error when the table cannot be described.
    async fn list_secondary_indexes(&self, resource: &ResourceId) -> AppResult<Vec<String>>;
}

/// Receives the flat result of a collection pass.
#[async_trait]
pub trait Reporter: Send + Sync {
    /// # Errors
    ///
    /// Returns an error when the points cannot be delivered.
    async fn report(&self, points: &[DataPoint]) -> AppResult<()>;
}
