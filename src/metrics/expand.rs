use crate::catalog::{INDEX_DIMENSION, MetricSpec};

use super::types::{Dimension, DimensionSet, ResourceId};

/// Expands one catalog entry into the dimension sets to query for `resource`.
///
/// Base sets come from the entry's fixed dimension sets (or just the table
/// dimension when it declares none). Unless the entry opts out, every base set
/// is repeated once per secondary index; the index sets are appended after the
/// base sets rather than replacing them.
#[must_use]
pub fn expand(spec: &MetricSpec, resource: &ResourceId, indexes: &[String]) -> Vec<DimensionSet> {
    let base: Vec<DimensionSet> = if spec.fixed_dimension_sets.is_empty() {
        vec![DimensionSet::for_resource(resource)]
    } else {
        spec.fixed_dimension_sets
            .iter()
            .map(|fixed| {
                fixed
                    .iter()
                    .fold(DimensionSet::for_resource(resource), |set, dimension| {
                        set.with(Dimension::new(dimension.name, dimension.value))
                    })
            })
            .collect()
    };

    if spec.ignore_index_expansion || indexes.is_empty() {
        return base;
    }

    let per_index = base.iter().flat_map(|set| {
        indexes
            .iter()
            .map(move |index| set.clone().with(Dimension::new(INDEX_DIMENSION, index)))
    });
    let mut expanded = Vec::with_capacity(base.len().saturating_mul(indexes.len().saturating_add(1)));
    expanded.extend(base.iter().cloned());
    expanded.extend(per_index);
    expanded
}
