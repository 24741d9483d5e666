//! Static catalog of DynamoDB metrics to collect and ratios to derive.
//!
//! The catalog is plain data: each [`MetricSpec`] describes one CloudWatch
//! metric, how it fans out across operation and secondary-index dimensions,
//! and how its value is post-processed before reporting. Derived metrics are
//! declared separately as [`DerivedMetricSpec`] entries and computed from the
//! normalized raw points after every query for a table has finished.
mod dynamodb;


use std::fmt;
use std::time::Duration;

use serde::Serialize;

pub use dynamodb::{DERIVED_METRICS, METRICS};

/// CloudWatch namespace for every catalog metric.
pub const NAMESPACE: &str = "AWS/DynamoDB";
/// Dimension naming the table; always the first dimension of a query.
pub const TABLE_DIMENSION: &str = "TableName";
/// Dimension naming a global secondary index.
pub const INDEX_DIMENSION: &str = "GlobalSecondaryIndexName";
/// Dimension naming the API operation for per-operation breakdowns.
pub const OPERATION_DIMENSION: &str = "Operation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Statistic {
    Sum,
    Average,
    Minimum,
    Maximum,
    SampleCount,
}

impl Statistic {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Statistic::Sum => "Sum",
            Statistic::Average => "Average",
            Statistic::Minimum => "Minimum",
            Statistic::Maximum => "Maximum",
            Statistic::SampleCount => "SampleCount",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    Count,
    Milliseconds,
    Percent,
}

impl Unit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Unit::Count => "Count",
            Unit::Milliseconds => "Milliseconds",
            Unit::Percent => "Percent",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed dimension declared by the catalog, e.g. `Operation=GetItem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticDimension {
    pub name: &'static str,
    pub value: &'static str,
}

/// One raw metric to query for every table.
#[derive(Debug, Clone, Copy)]
pub struct MetricSpec {
    pub name: &'static str,
    pub statistic: Statistic,
    pub unit: Unit,
    /// Value reported when the backend has no data for the window.
    pub default_value: Option<f64>,
    /// Aggregation period; `None` uses the planner default.
    pub period: Option<Duration>,
    pub scale_divisor: Option<f64>,
    pub reporting_prefix: Option<&'static str>,
    /// Each entry becomes one query, prefixed by the table dimension.
    pub fixed_dimension_sets: &'static [&'static [StaticDimension]],
    /// Skip the per-secondary-index fan-out for this metric.
    pub ignore_index_expansion: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedKind {
    /// `numerator * 100 / denominator`, reported in percent.
    Ratio,
}

/// A metric computed from two raw catalog metrics of the same scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedMetricSpec {
    pub output_name: &'static str,
    pub kind: DerivedKind,
    pub numerator: &'static str,
    pub denominator: &'static str,
}

#[must_use]
pub const fn catalog() -> &'static [MetricSpec] {
    &METRICS
}

#[must_use]
pub const fn derived_catalog() -> &'static [DerivedMetricSpec] {
    &DERIVED_METRICS
}

/// Looks up a raw metric by its CloudWatch name.
#[must_use]
pub fn find_metric(name: &str) -> Option<&'static MetricSpec> {
    METRICS.iter().find(|spec| spec.name == name)
}
