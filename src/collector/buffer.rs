use std::collections::HashSet;

use tracing::warn;

use crate::catalog::DerivedMetricSpec;
use crate::metrics::{DataPoint, ResourceId, derive};

/// Points gathered for one table during a pass.
///
/// Owned by the table's task. Reporting names are unique: a later point with
/// an already-seen name is dropped, never overwriting the first.
#[derive(Debug)]
pub(crate) struct ResourceBuffer {
    resource: ResourceId,
    points: Vec<DataPoint>,
    names: HashSet<String>,
}

impl ResourceBuffer {
    pub(crate) fn new(resource: ResourceId) -> Self {
        Self {
            resource,
            points: Vec::new(),
            names: HashSet::new(),
        }
    }

    pub(crate) fn push(&mut self, point: DataPoint) -> bool {
        if !self.names.insert(point.reporting_name.clone()) {
            warn!(
                "Duplicate reporting name {} for {}; keeping the first value",
                point.reporting_name, self.resource
            );
            return false;
        }
        self.points.push(point);
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }

    /// Appends derived metrics and hands the points over.
    pub(crate) fn finish(mut self, derived: &[DerivedMetricSpec]) -> Vec<DataPoint> {
        for point in derive(&self.resource, &self.points, derived) {
            self.push(point);
        }
        self.points
    }
}
