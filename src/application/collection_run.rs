use std::sync::Arc;

use tracing::info;

use crate::collector::{
    Collector, CollectorSettings, MetricSource, Reporter, ResourceDiscovery, discover,
};
use crate::error::AppResult;

/// Inputs for one collection pass.
#[derive(Debug, Clone)]
pub(crate) struct CollectionRunCommand {
    settings: CollectorSettings,
    tables: Option<Vec<String>>,
}

impl CollectionRunCommand {
    #[must_use]
    pub(crate) const fn new(settings: CollectorSettings, tables: Option<Vec<String>>) -> Self {
        Self { settings, tables }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunOutcome {
    pub tables: usize,
    pub points: usize,
}

/// Discover, collect, and report once.
///
/// Discovery and reporting failures fail the run; query failures do not.
pub(crate) async fn execute(
    command: CollectionRunCommand,
    discovery: &dyn ResourceDiscovery,
    source: Arc<dyn MetricSource>,
    reporter: &dyn Reporter,
) -> AppResult<RunOutcome> {
    let (resources, index_map) = discover(discovery, command.tables.as_deref()).await?;
    let collector = Collector::new(source, command.settings);
    let points = collector.collect(&resources, &index_map).await;
    reporter.report(&points).await?;

    let outcome = RunOutcome {
        tables: resources.len(),
        points: points.len(),
    };
    info!(
        "Collection finished: {} tables, {} data points",
        outcome.tables, outcome.points
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::collector::MetricQuery;
    use crate::error::{AppError, AwsError};
    use crate::metrics::{DataPoint, ResourceId};

    struct FakeDiscovery {
        fail: bool,
    }

    #[async_trait]
    impl ResourceDiscovery for FakeDiscovery {
        async fn list_resources(&self) -> AppResult<Vec<ResourceId>> {
            if self.fail {
                return Err(AppError::aws(AwsError::MissingCredentials));
            }
            Ok(vec![ResourceId::new("orders")])
        }

        async fn list_secondary_indexes(&self, _resource: &ResourceId) -> AppResult<Vec<String>> {
            Ok(Vec::new())
        }
    }

    struct ConstantSource;

    #[async_trait]
    impl MetricSource for ConstantSource {
        async fn query_metric(&self, query: &MetricQuery<'_>) -> AppResult<Option<f64>> {
            match query.metric_name {
                "ProvisionedReadCapacityUnits" => Ok(Some(300.0)),
                "ConsumedReadCapacityUnits" => Ok(Some(7200.0)),
                _ => Ok(None),
            }
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        reported: Mutex<Vec<DataPoint>>,
    }

    #[async_trait]
    impl Reporter for RecordingReporter {
        async fn report(&self, points: &[DataPoint]) -> AppResult<()> {
            let mut reported = self
                .reported
                .lock()
                .map_err(|_poisoned| AppError::validation("reporter lock poisoned"))?;
            reported.extend_from_slice(points);
            Ok(())
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn execute_reports_collected_points() -> AppResult<()> {
        let reporter = RecordingReporter::default();
        let outcome = execute(
            CollectionRunCommand::new(CollectorSettings::default(), None),
            &FakeDiscovery { fail: false },
            Arc::new(ConstantSource),
            &reporter,
        )
        .await?;

        if outcome.tables != 1 {
            return Err(AppError::validation("expected one table"));
        }
        let reported = reporter
            .reported
            .lock()
            .map_err(|_poisoned| AppError::validation("reporter lock poisoned"))?;
        if reported.len() != outcome.points {
            return Err(AppError::validation("outcome must count reported points"));
        }
        if !reported
            .iter()
            .any(|point| point.reporting_name == "Utilization/ReadUtilization")
        {
            return Err(AppError::validation("expected read utilization"));
        }
        Ok(())
    }

    #[tokio::test(flavor = "current_thread")]
    async fn execute_fails_when_discovery_fails() -> AppResult<()> {
        let reporter = RecordingReporter::default();
        let result = execute(
            CollectionRunCommand::new(CollectorSettings::default(), None),
            &FakeDiscovery { fail: true },
            Arc::new(ConstantSource),
            &reporter,
        )
        .await;
        if result.is_ok() {
            return Err(AppError::validation("discovery failure must fail the run"));
        }
        let reported = reporter
            .reported
            .lock()
            .map_err(|_poisoned| AppError::validation("reporter lock poisoned"))?;
        if !reported.is_empty() {
            return Err(AppError::validation("nothing must be reported"));
        }
        Ok(())
    }
}
