use std::time::Duration;

use super::{
    DerivedKind, DerivedMetricSpec, MetricSpec, OPERATION_DIMENSION, StaticDimension, Statistic,
    Unit,
};

const PROVISIONED_PERIOD: Duration = Duration::from_secs(300);
const CONSUMED_PERIOD: Duration = Duration::from_secs(60);
/// Consumed capacity is summed per minute; dividing by 60 reports units/second.
const PER_SECOND: f64 = 60.0;

const fn operation(value: &'static str) -> StaticDimension {
    StaticDimension {
        name: OPERATION_DIMENSION,
        value,
    }
}

const ALL_OPERATIONS: &[&[StaticDimension]] = &[
    &[operation("GetItem")],
    &[operation("PutItem")],
    &[operation("UpdateItem")],
    &[operation("DeleteItem")],
    &[operation("Query")],
    &[operation("Scan")],
    &[operation("BatchGetItem")],
    &[operation("BatchWriteItem")],
];

const READ_OPERATIONS: &[&[StaticDimension]] = &[&[operation("Query")], &[operation("Scan")]];

const fn table_metric(
    name: &'static str,
    statistic: Statistic,
    unit: Unit,
    reporting_prefix: &'static str,
) -> MetricSpec {
    MetricSpec {
        name,
        statistic,
        unit,
        default_value: None,
        period: None,
        scale_divisor: None,
        reporting_prefix: Some(reporting_prefix),
        fixed_dimension_sets: &[],
        ignore_index_expansion: false,
    }
}

pub static METRICS: [MetricSpec; 10] = [
    MetricSpec {
        default_value: Some(0.0),
        ..table_metric("ReadThrottleEvents", Statistic::Sum, Unit::Count, "Throttled")
    },
    MetricSpec {
        default_value: Some(0.0),
        ..table_metric("WriteThrottleEvents", Statistic::Sum, Unit::Count, "Throttled")
    },
    MetricSpec {
        default_value: Some(0.0),
        fixed_dimension_sets: ALL_OPERATIONS,
        ignore_index_expansion: true,
        ..table_metric("ThrottledRequests", Statistic::Sum, Unit::Count, "Throttled")
    },
    MetricSpec {
        default_value: Some(0.0),
        fixed_dimension_sets: ALL_OPERATIONS,
        ignore_index_expansion: true,
        ..table_metric("SystemErrors", Statistic::Sum, Unit::Count, "Errors")
    },
    MetricSpec {
        period: Some(PROVISIONED_PERIOD),
        ..table_metric(
            "ProvisionedReadCapacityUnits",
            Statistic::Average,
            Unit::Count,
            "Capacity/Read",
        )
    },
    MetricSpec {
        period: Some(PROVISIONED_PERIOD),
        ..table_metric(
            "ProvisionedWriteCapacityUnits",
            Statistic::Average,
            Unit::Count,
            "Capacity/Write",
        )
    },
    MetricSpec {
        default_value: Some(0.0),
        period: Some(CONSUMED_PERIOD),
        scale_divisor: Some(PER_SECOND),
        ..table_metric(
            "ConsumedReadCapacityUnits",
            Statistic::Sum,
            Unit::Count,
            "Capacity/Read",
        )
    },
    MetricSpec {
        default_value: Some(0.0),
        period: Some(CONSUMED_PERIOD),
        scale_divisor: Some(PER_SECOND),
        ..table_metric(
            "ConsumedWriteCapacityUnits",
            Statistic::Sum,
            Unit::Count,
            "Capacity/Write",
        )
    },
    MetricSpec {
        fixed_dimension_sets: ALL_OPERATIONS,
        ignore_index_expansion: true,
        ..table_metric(
            "SuccessfulRequestLatency",
            Statistic::Average,
            Unit::Milliseconds,
            "Latency",
        )
    },
    MetricSpec {
        fixed_dimension_sets: READ_OPERATIONS,
        ignore_index_expansion: true,
        ..table_metric("ReturnedItemCount", Statistic::Average, Unit::Count, "Items")
    },
];

pub static DERIVED_METRICS: [DerivedMetricSpec; 2] = [
    DerivedMetricSpec {
        output_name: "Utilization/ReadUtilization",
        kind: DerivedKind::Ratio,
        numerator: "ConsumedReadCapacityUnits",
        denominator: "ProvisionedReadCapacityUnits",
    },
    DerivedMetricSpec {
        output_name: "Utilization/WriteUtilization",
        kind: DerivedKind::Ratio,
        numerator: "ConsumedWriteCapacityUnits",
        denominator: "ProvisionedWriteCapacityUnits",
    },
];
