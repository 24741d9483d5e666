use std::time::Duration;

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};

/// Aggregation period used when a catalog entry does not declare one.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(60);
/// Number of periods the window reaches back past the ingestion delay.
///
/// CloudWatch may not have aggregated the most recent periods yet; looking back
/// several periods makes it likely at least one datapoint exists. Tunable.
pub const WINDOW_PERIODS: u32 = 5;

/// Start of the query range for a metric with the given aggregation period.
///
/// `start = now - (ingestion_delay + period * WINDOW_PERIODS)`. Saturates to the
/// earliest representable instant instead of overflowing.
#[must_use]
pub fn query_start(
    now: DateTime<Utc>,
    period: Option<Duration>,
    ingestion_delay: Duration,
) -> DateTime<Utc> {
    let period = period.unwrap_or(DEFAULT_PERIOD);
    period
        .checked_mul(WINDOW_PERIODS)
        .and_then(|lookback| lookback.checked_add(ingestion_delay))
        .and_then(|lookback| subtract(now, lookback))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn subtract(now: DateTime<Utc>, offset: Duration) -> Option<DateTime<Utc>> {
    TimeDelta::from_std(offset)
        .ok()
        .and_then(|delta| now.checked_sub_signed(delta))
}

/// Time range and period handed to the query backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub period: Duration,
}

impl QueryWindow {
    #[must_use]
    pub fn plan(now: DateTime<Utc>, period: Option<Duration>, ingestion_delay: Duration) -> Self {
        let start = query_start(now, period, ingestion_delay);
        let end = subtract(now, ingestion_delay).unwrap_or(start);
        Self {
            start,
            end,
            period: period.unwrap_or(DEFAULT_PERIOD),
        }
    }

    #[must_use]
    pub fn start_iso8601(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    #[must_use]
    pub fn end_iso8601(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}
