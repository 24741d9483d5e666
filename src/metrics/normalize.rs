use crate::catalog::MetricSpec;

use super::types::{DataPoint, DimensionSet, GSI_TAG, PointKey, ResourceId, Scope};

/// Turns one raw query result into a reporting data point.
///
/// Returns `None` when there is no value to report: the backend had no data and
/// the entry declares no default, or scaling produced a non-finite number.
#[must_use]
pub fn normalize(
    raw: Option<f64>,
    spec: &MetricSpec,
    resource: &ResourceId,
    dimensions: &DimensionSet,
) -> Option<DataPoint> {
    let value = raw.or(spec.default_value)?;
    let value = scale(value, spec.scale_divisor)?;

    Some(DataPoint {
        resource_id: resource.clone(),
        reporting_name: reporting_name(spec, dimensions),
        unit: spec.unit,
        value,
        key: PointKey {
            metric: spec.name,
            scope: Scope::of(dimensions),
        },
    })
}

#[expect(
    clippy::float_arithmetic,
    reason = "Scaling reported metric values is floating-point by nature"
)]
fn scale(value: f64, divisor: Option<f64>) -> Option<f64> {
    let scaled = divisor.map_or(value, |divisor| value / divisor);
    scaled.is_finite().then_some(scaled)
}

fn reporting_name(spec: &MetricSpec, dimensions: &DimensionSet) -> String {
    let base = spec.reporting_prefix.map_or_else(
        || spec.name.to_owned(),
        |prefix| format!("{}/{}", prefix, spec.name),
    );
    if dimensions.len() <= 1 {
        return base;
    }

    match dimensions.index_name() {
        Some(index) => {
            let mut segments = vec![GSI_TAG, base.as_str()];
            segments.extend(dimensions.breakdown_values());
            segments.push(index);
            segments.join("/")
        }
        None => match dimensions.last_value() {
            Some(suffix) => format!("{}/{}", base, suffix),
            None => base,
        },
    }
}
