//! Collection pass: query every catalog metric for every table, normalize the
//! results, and derive ratios once a table's queries have all finished.
mod buffer;
mod discovery;
mod ports;


use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};

use crate::catalog::{self, DerivedMetricSpec, MetricSpec};
use crate::metrics::{
    DataPoint, DimensionSet, QueryWindow, ResourceId, SecondaryIndexSet, expand, normalize,
};

use buffer::ResourceBuffer;

pub use discovery::discover;
pub use ports::{MetricQuery, MetricSource, Reporter, ResourceDiscovery};

/// Default ingestion delay subtracted from "now" before querying.
pub const DEFAULT_INGESTION_DELAY: Duration = Duration::from_secs(60);
/// Default number of queries in flight at once.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectorSettings {
    pub ingestion_delay: Duration,
    pub max_concurrency: NonZeroUsize,
    /// Pass deadline; tables unfinished at expiry are dropped from the result.
    pub deadline: Option<Duration>,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            ingestion_delay: DEFAULT_INGESTION_DELAY,
            max_concurrency: NonZeroUsize::new(DEFAULT_MAX_CONCURRENCY)
                .unwrap_or(NonZeroUsize::MIN),
            deadline: None,
        }
    }
}

pub struct Collector {
    source: Arc<dyn MetricSource>,
    metrics: &'static [MetricSpec],
    derived: &'static [DerivedMetricSpec],
    settings: CollectorSettings,
}

impl Collector {
    #[must_use]
    pub fn new(source: Arc<dyn MetricSource>, settings: CollectorSettings) -> Self {
        Self::with_catalog(
            source,
            catalog::catalog(),
            catalog::derived_catalog(),
            settings,
        )
    }

    #[must_use]
    pub fn with_catalog(
        source: Arc<dyn MetricSource>,
        metrics: &'static [MetricSpec],
        derived: &'static [DerivedMetricSpec],
        settings: CollectorSettings,
    ) -> Self {
        Self {
            source,
            metrics,
            derived,
            settings,
        }
    }

    /// Runs one collection pass over `resources`.
    ///
    /// Never fails: query errors degrade to missing data and a pass that hits
    /// its deadline returns the tables finished so far.
    pub async fn collect(
        &self,
        resources: &[ResourceId],
        index_map: &SecondaryIndexSet,
    ) -> Vec<DataPoint> {
        self.collect_at(Utc::now(), resources, index_map).await
    }

    pub(crate) async fn collect_at(
        &self,
        now: DateTime<Utc>,
        resources: &[ResourceId],
        index_map: &SecondaryIndexSet,
    ) -> Vec<DataPoint> {
        let permits = Arc::new(Semaphore::new(self.settings.max_concurrency.get()));
        let mut tasks = JoinSet::new();
        for resource in resources {
            let task = ResourceTask {
                source: Arc::clone(&self.source),
                permits: Arc::clone(&permits),
                metrics: self.metrics,
                derived: self.derived,
                resource: resource.clone(),
                indexes: index_map.indexes_for(resource).to_vec(),
                now,
                ingestion_delay: self.settings.ingestion_delay,
            };
            tasks.spawn(task.run());
        }

        let deadline = self
            .settings
            .deadline
            .and_then(|limit| Instant::now().checked_add(limit));
        let mut points = Vec::new();
        let mut completed = 0usize;
        loop {
            let next = match deadline {
                Some(at) => {
                    if let Ok(next) = timeout_at(at, tasks.join_next()).await {
                        next
                    } else {
                        warn!(
                            "Collection deadline reached; returning {} of {} tables ({} unfinished)",
                            completed,
                            resources.len(),
                            tasks.len()
                        );
                        tasks.abort_all();
                        break;
                    }
                }
                None => tasks.join_next().await,
            };
            match next {
                Some(Ok(resource_points)) => {
                    completed = completed.saturating_add(1);
                    points.extend(resource_points);
                }
                Some(Err(err)) => warn!("Table collection task failed: {}", err),
                None => break,
            }
        }
        info!(
            "Collected {} data points from {} tables",
            points.len(),
            completed
        );
        points
    }
}

struct ResourceTask {
    source: Arc<dyn MetricSource>,
    permits: Arc<Semaphore>,
    metrics: &'static [MetricSpec],
    derived: &'static [DerivedMetricSpec],
    resource: ResourceId,
    indexes: Vec<String>,
    now: DateTime<Utc>,
    ingestion_delay: Duration,
}

impl ResourceTask {
    async fn run(self) -> Vec<DataPoint> {
        let planned: Vec<(&'static MetricSpec, DimensionSet)> = self
            .metrics
            .iter()
            .flat_map(|spec| {
                expand(spec, &self.resource, &self.indexes)
                    .into_iter()
                    .map(move |dimensions| (spec, dimensions))
            })
            .collect();
        debug!("{}: {} queries planned", self.resource, planned.len());

        let results = join_all(
            planned
                .iter()
                .map(|(spec, dimensions)| self.query(spec, dimensions)),
        )
        .await;

        let mut buffer = ResourceBuffer::new(self.resource.clone());
        for ((spec, dimensions), raw) in planned.iter().zip(results) {
            if let Some(point) = normalize(raw, spec, &self.resource, dimensions) {
                buffer.push(point);
            }
        }
        debug!("{}: {} raw points", self.resource, buffer.len());
        buffer.finish(self.derived)
    }

    async fn query(&self, spec: &MetricSpec, dimensions: &DimensionSet) -> Option<f64> {
        let query = MetricQuery {
            namespace: catalog::NAMESPACE,
            metric_name: spec.name,
            statistic: spec.statistic,
            unit: spec.unit,
            window: QueryWindow::plan(self.now, spec.period, self.ingestion_delay),
            dimensions,
        };

        let Ok(_permit) = self.permits.acquire().await else {
            warn!("Query permits closed; skipping {} [{}]", spec.name, dimensions);
            return None;
        };
        match self.source.query_metric(&query).await {
            Ok(response) => {
                debug!(
                    "metric_name: {}, statistic: {}, unit: {}, dimensions: [{}], window: {}..{}, response: {:?}",
                    spec.name,
                    spec.statistic,
                    spec.unit,
                    dimensions,
                    query.window.start_iso8601(),
                    query.window.end_iso8601(),
                    response
                );
                response
            }
            Err(err) => {
                warn!(
                    "Query failed (namespace: {}, metric: {}, statistic: {}, unit: {}, dimensions: [{}], window: {}..{}): {}; treating as no data",
                    query.namespace,
                    spec.name,
                    spec.statistic,
                    spec.unit,
                    dimensions,
                    query.window.start_iso8601(),
                    query.window.end_iso8601(),
                    err
                );
                None
            }
        }
    }
}
