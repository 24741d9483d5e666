use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::args::{CollectArgs, OutputFormat};
use crate::aws::{AwsCredentials, AwsSettings};
use crate::collector::{CollectorSettings, DEFAULT_INGESTION_DELAY, DEFAULT_MAX_CONCURRENCY};
use crate::error::{AppError, AppResult, AwsError, ConfigError};

use super::types::ConfigFile;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything one collection run needs, after merging CLI, file, and defaults.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub aws: AwsSettings,
    pub collector: CollectorSettings,
    pub tables: Option<Vec<String>>,
    pub output: Option<PathBuf>,
    pub output_format: OutputFormat,
}

/// Merges CLI arguments over config file values over defaults.
///
/// # Errors
///
/// Returns an error when a config value is invalid, the region is missing, or
/// no credentials can be found.
pub fn resolve_settings(args: CollectArgs, config: Option<ConfigFile>) -> AppResult<RunSettings> {
    resolve_with_credentials(args, config, AwsCredentials::resolve)
}

pub(crate) fn resolve_with_credentials<F>(
    args: CollectArgs,
    config: Option<ConfigFile>,
    credentials: F,
) -> AppResult<RunSettings>
where
    F: FnOnce(Option<String>, Option<String>, Option<String>) -> AppResult<AwsCredentials>,
{
    let config = config.unwrap_or_default();

    let region = args
        .region
        .or(config.region)
        .filter(|region| !region.trim().is_empty())
        .ok_or_else(|| AppError::aws(AwsError::MissingRegion))?;

    let aws_config = config.aws.unwrap_or_default();
    if aws_config.secret_key.is_some() && aws_config.access_key.is_none() {
        return Err(AppError::config(ConfigError::SecretWithoutAccessKey));
    }
    let credentials = credentials(
        aws_config.access_key,
        aws_config.secret_key,
        aws_config.session_token,
    )?;

    let ingestion_delay = match (args.ingestion_delay, config.ingestion_delay) {
        (Some(delay), _) => delay,
        (None, Some(value)) => value.to_duration("ingestion_delay")?,
        (None, None) => DEFAULT_INGESTION_DELAY,
    };
    let max_concurrency = match (args.max_concurrency, config.max_concurrency) {
        (Some(limit), _) => limit.non_zero(),
        (None, Some(limit)) => NonZeroUsize::new(limit).ok_or_else(|| {
            AppError::config(ConfigError::FieldMustBePositive {
                field: "max_concurrency",
            })
        })?,
        (None, None) => NonZeroUsize::new(DEFAULT_MAX_CONCURRENCY).unwrap_or(NonZeroUsize::MIN),
    };
    let deadline = match (args.deadline, config.deadline) {
        (Some(deadline), _) => Some(deadline),
        (None, Some(value)) => Some(value.to_positive_duration("deadline")?),
        (None, None) => None,
    };
    let request_timeout = match (args.request_timeout, config.request_timeout) {
        (Some(timeout), _) => timeout,
        (None, Some(value)) => value.to_positive_duration("request_timeout")?,
        (None, None) => DEFAULT_REQUEST_TIMEOUT,
    };

    let tables = if args.tables.is_empty() {
        config.tables
    } else {
        Some(args.tables)
    };

    let settings = RunSettings {
        aws: AwsSettings {
            region,
            credentials,
            cloudwatch_endpoint: args.cloudwatch_endpoint.or(config.cloudwatch_endpoint),
            dynamodb_endpoint: args.dynamodb_endpoint.or(config.dynamodb_endpoint),
            request_timeout,
        },
        collector: CollectorSettings {
            ingestion_delay,
            max_concurrency,
            deadline,
        },
        tables,
        output: args.output.or(config.output).map(PathBuf::from),
        output_format: args
            .output_format
            .or(config.output_format)
            .unwrap_or_default(),
    };
    debug!("Resolved settings: {:?}", settings);
    Ok(settings)
}
