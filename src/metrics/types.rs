use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{INDEX_DIMENSION, TABLE_DIMENSION, Unit};

/// Reporting-name tag marking points scoped to a secondary index.
pub const GSI_TAG: &str = "GSI";

/// Name of a monitored table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Secondary index names per table, fixed for the duration of a pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecondaryIndexSet {
    indexes: BTreeMap<ResourceId, Vec<String>>,
}

impl SecondaryIndexSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes known for `resource`; empty when discovery reported none.
    #[must_use]
    pub fn indexes_for(&self, resource: &ResourceId) -> &[String] {
        self.indexes.get(resource).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}

impl FromIterator<(ResourceId, Vec<String>)> for SecondaryIndexSet {
    fn from_iter<T: IntoIterator<Item = (ResourceId, Vec<String>)>>(iter: T) -> Self {
        Self {
            indexes: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dimension {
    pub name: &'static str,
    pub value: String,
}

impl Dimension {
    #[must_use]
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// Ordered dimensions scoping one query. The table dimension is always first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DimensionSet {
    dimensions: Vec<Dimension>,
}

impl DimensionSet {
    #[must_use]
    pub fn for_resource(resource: &ResourceId) -> Self {
        Self {
            dimensions: vec![Dimension::new(TABLE_DIMENSION, resource.as_str())],
        }
    }

    #[must_use]
    pub fn with(mut self, dimension: Dimension) -> Self {
        self.dimensions.push(dimension);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Dimension> {
        self.dimensions.iter()
    }

    /// Value of the secondary-index dimension, if this set carries one.
    #[must_use]
    pub fn index_name(&self) -> Option<&str> {
        self.dimensions
            .iter()
            .find(|dimension| dimension.name == INDEX_DIMENSION)
            .map(|dimension| dimension.value.as_str())
    }

    #[must_use]
    pub fn last_value(&self) -> Option<&str> {
        self.dimensions
            .last()
            .map(|dimension| dimension.value.as_str())
    }

    /// Values of the dimensions that are neither the table nor the index.
    pub fn breakdown_values(&self) -> impl Iterator<Item = &str> {
        self.dimensions
            .iter()
            .skip(1)
            .filter(|dimension| dimension.name != INDEX_DIMENSION)
            .map(|dimension| dimension.value.as_str())
    }
}

impl<'set> IntoIterator for &'set DimensionSet {
    type Item = &'set Dimension;
    type IntoIter = std::slice::Iter<'set, Dimension>;

    fn into_iter(self) -> Self::IntoIter {
        self.dimensions.iter()
    }
}

impl fmt::Display for DimensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, dimension) in self.dimensions.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", dimension.name, dimension.value)?;
        }
        Ok(())
    }
}

/// Where a point applies within its table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Table,
    Index(String),
    /// Per-operation (or other fixed dimension) breakdown, optionally per index.
    Breakdown {
        values: Vec<String>,
        index: Option<String>,
    },
}

impl Scope {
    #[must_use]
    pub fn of(dimensions: &DimensionSet) -> Self {
        let values: Vec<String> = dimensions.breakdown_values().map(str::to_owned).collect();
        let index = dimensions.index_name().map(str::to_owned);
        match (values.is_empty(), index) {
            (true, None) => Scope::Table,
            (true, Some(index)) => Scope::Index(index),
            (false, index) => Scope::Breakdown { values, index },
        }
    }
}

/// Lookup key of a point: the catalog metric (or derived output) and its scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PointKey {
    pub metric: &'static str,
    pub scope: Scope,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    pub resource_id: ResourceId,
    pub reporting_name: String,
    pub unit: Unit,
    pub value: f64,
    #[serde(skip)]
    pub key: PointKey,
}
