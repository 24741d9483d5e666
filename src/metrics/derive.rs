use std::collections::HashMap;

use tracing::debug;

use crate::catalog::{DerivedKind, DerivedMetricSpec, Unit};

use super::types::{DataPoint, GSI_TAG, PointKey, ResourceId, Scope};

/// Computes derived metrics from one table's normalized points.
///
/// Numerators and denominators are paired by `(metric, scope)`: a table-wide
/// denominator pairs with the table-wide numerator, an index-scoped one with
/// the numerator of the same index. Per-operation points never participate.
/// Missing numerators and zero denominators produce no point.
#[must_use]
pub fn derive(
    resource: &ResourceId,
    points: &[DataPoint],
    specs: &[DerivedMetricSpec],
) -> Vec<DataPoint> {
    let mut by_key: HashMap<(&str, &Scope), &DataPoint> = HashMap::with_capacity(points.len());
    for point in points {
        by_key
            .entry((point.key.metric, &point.key.scope))
            .or_insert(point);
    }

    let mut derived = Vec::new();
    for spec in specs {
        for denominator in points
            .iter()
            .filter(|point| point.key.metric == spec.denominator)
        {
            let reporting_name = match &denominator.key.scope {
                Scope::Table => spec.output_name.to_owned(),
                Scope::Index(index) => format!("{}/{}/{}", GSI_TAG, spec.output_name, index),
                Scope::Breakdown { .. } => continue,
            };
            let Some(numerator) = by_key.get(&(spec.numerator, &denominator.key.scope)) else {
                debug!(
                    "No {} for {} ({}); skipping {}",
                    spec.numerator, resource, denominator.reporting_name, reporting_name
                );
                continue;
            };
            let value = match spec.kind {
                DerivedKind::Ratio => ratio_percent(numerator.value, denominator.value),
            };
            let Some(value) = value else {
                debug!(
                    "Zero {} for {}; skipping {}",
                    spec.denominator, resource, reporting_name
                );
                continue;
            };
            derived.push(DataPoint {
                resource_id: resource.clone(),
                reporting_name,
                unit: Unit::Percent,
                value,
                key: PointKey {
                    metric: spec.output_name,
                    scope: denominator.key.scope.clone(),
                },
            });
        }
    }
    derived
}

/// `numerator * 100 / denominator`, or `None` when the denominator is zero.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "Percentages are computed on floating-point metric values"
)]
pub fn ratio_percent(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator.abs() < f64::MIN_POSITIVE {
        return None;
    }
    let value = numerator * 100.0 / denominator;
    value.is_finite().then_some(value)
}
