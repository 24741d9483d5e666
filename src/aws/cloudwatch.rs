use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::Statistic;
use crate::collector::{MetricQuery, MetricSource};
use crate::error::AppResult;

use super::client::JsonRpcClient;

const GET_METRIC_STATISTICS: &str = "GetMetricStatistics";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct DimensionInput<'query> {
    pub name: &'static str,
    pub value: &'query str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct GetMetricStatisticsInput<'query> {
    pub namespace: &'static str,
    pub metric_name: &'static str,
    pub dimensions: Vec<DimensionInput<'query>>,
    /// Epoch seconds, as the JSON protocol encodes timestamps.
    pub start_time: i64,
    pub end_time: i64,
    pub period: u64,
    pub statistics: [Statistic; 1],
    pub unit: &'static str,
}

impl<'query> GetMetricStatisticsInput<'query> {
    pub(super) fn from_query(query: &MetricQuery<'query>) -> Self {
        Self {
            namespace: query.namespace,
            metric_name: query.metric_name,
            dimensions: query
                .dimensions
                .iter()
                .map(|dimension| DimensionInput {
                    name: dimension.name,
                    value: &dimension.value,
                })
                .collect(),
            start_time: query.window.start.timestamp(),
            end_time: query.window.end.timestamp(),
            period: query.window.period.as_secs().max(1),
            statistics: [query.statistic],
            unit: query.unit.as_str(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct GetMetricStatisticsOutput {
    #[serde(default)]
    pub datapoints: Vec<Datapoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct Datapoint {
    pub timestamp: f64,
    pub sum: Option<f64>,
    pub average: Option<f64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub sample_count: Option<f64>,
}

impl Datapoint {
    const fn value(&self, statistic: Statistic) -> Option<f64> {
        match statistic {
            Statistic::Sum => self.sum,
            Statistic::Average => self.average,
            Statistic::Minimum => self.minimum,
            Statistic::Maximum => self.maximum,
            Statistic::SampleCount => self.sample_count,
        }
    }
}

impl GetMetricStatisticsOutput {
    /// Requested statistic of the most recent datapoint, if any.
    pub(super) fn latest_value(&self, statistic: Statistic) -> Option<f64> {
        self.datapoints
            .iter()
            .max_by(|left, right| left.timestamp.total_cmp(&right.timestamp))
            .and_then(|datapoint| datapoint.value(statistic))
    }
}

/// CloudWatch `GetMetricStatistics` as a [`MetricSource`].
#[derive(Debug, Clone)]
pub struct CloudWatchClient {
    rpc: JsonRpcClient,
}

impl CloudWatchClient {
    pub(crate) const fn new(rpc: JsonRpcClient) -> Self {
        Self { rpc }
    }
}

#[async_trait]
impl MetricSource for CloudWatchClient {
    async fn query_metric(&self, query: &MetricQuery<'_>) -> AppResult<Option<f64>> {
        let input = GetMetricStatisticsInput::from_query(query);
        let output: GetMetricStatisticsOutput =
            self.rpc.call(GET_METRIC_STATISTICS, &input).await?;
        Ok(output.latest_value(query.statistic))
    }
}
