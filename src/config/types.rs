use std::time::Duration;

use serde::Deserialize;

use crate::args::OutputFormat;
use crate::args::parsers::parse_duration_value;
use crate::error::{AppError, AppResult, ConfigError};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub region: Option<String>,
    pub tables: Option<Vec<String>>,
    pub ingestion_delay: Option<DurationValue>,
    #[serde(alias = "concurrency")]
    pub max_concurrency: Option<usize>,
    pub deadline: Option<DurationValue>,
    pub request_timeout: Option<DurationValue>,
    pub output: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub cloudwatch_endpoint: Option<String>,
    pub dynamodb_endpoint: Option<String>,
    pub aws: Option<AwsConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AwsConfig {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub session_token: Option<String>,
}

/// A duration given either as whole seconds or as text like `"90s"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self, field: &'static str) -> AppResult<Duration> {
        match self {
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_value(text)
                .map_err(|source| AppError::config(ConfigError::InvalidField { field, source })),
        }
    }

    pub(crate) fn to_positive_duration(&self, field: &'static str) -> AppResult<Duration> {
        let duration = self.to_duration(field)?;
        if duration.is_zero() {
            return Err(AppError::config(ConfigError::FieldMustBePositive { field }));
        }
        Ok(duration)
    }
}
