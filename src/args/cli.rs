use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_duration_allow_zero, parse_duration_arg, parse_positive_usize};
use super::types::{OutputFormat, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Collect DynamoDB table and index metrics from CloudWatch, with derived utilization ratios.",
    next_help_heading = "Advanced Options"
)]
pub struct CollectArgs {
    /// Path to a TOML or JSON config file (default: ./tablewatch.toml or ./tablewatch.json)
    #[arg(long, short, help_heading = "Common Options")]
    pub config: Option<String>,

    /// AWS region of the tables
    #[arg(long, short, env = "AWS_REGION", help_heading = "Common Options")]
    pub region: Option<String>,

    /// Table to collect (repeatable); skips table discovery
    #[arg(long = "table", short = 't', help_heading = "Common Options")]
    pub tables: Vec<String>,

    /// Output format
    #[arg(long = "output-format", value_enum, help_heading = "Common Options")]
    pub output_format: Option<OutputFormat>,

    /// Write data points to this file instead of stdout
    #[arg(long, short, help_heading = "Common Options")]
    pub output: Option<String>,

    /// Enable debug logging
    #[arg(long, short, default_value_t = false, help_heading = "Common Options")]
    pub verbose: bool,

    /// Delay subtracted from now before querying (e.g. 60s, 2m; 0 disables)
    #[arg(long = "ingestion-delay", value_parser = parse_duration_allow_zero)]
    pub ingestion_delay: Option<Duration>,

    /// Maximum CloudWatch queries in flight
    #[arg(long = "max-concurrency", value_parser = parse_positive_usize)]
    pub max_concurrency: Option<PositiveUsize>,

    /// Abort the pass after this long and report the tables finished so far
    #[arg(long, value_parser = parse_duration_arg)]
    pub deadline: Option<Duration>,

    /// Timeout for a single AWS request
    #[arg(long = "request-timeout", value_parser = parse_duration_arg)]
    pub request_timeout: Option<Duration>,

    /// Override the CloudWatch endpoint URL
    #[arg(long = "cloudwatch-endpoint")]
    pub cloudwatch_endpoint: Option<String>,

    /// Override the DynamoDB endpoint URL
    #[arg(long = "dynamodb-endpoint")]
    pub dynamodb_endpoint: Option<String>,
}
