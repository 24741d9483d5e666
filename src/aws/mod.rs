//! AWS adapters: CloudWatch as the metric source, DynamoDB for discovery.
//!
//! Both services speak the JSON 1.0 protocol, signed with SigV4.
mod client;
mod cloudwatch;
mod credentials;
mod dynamodb;
mod signing;

#[cfg(test)]
mod tests;

use std::time::Duration;

use reqwest::Client;

use crate::error::{AppError, AppResult, AwsError, AwsService};

pub use cloudwatch::CloudWatchClient;
pub use credentials::AwsCredentials;
pub use dynamodb::DynamoDbClient;

use client::{JsonRpcClient, resolve_endpoint};

/// Connection settings shared by both service clients.
#[derive(Debug, Clone)]
pub struct AwsSettings {
    pub region: String,
    pub credentials: AwsCredentials,
    pub cloudwatch_endpoint: Option<String>,
    pub dynamodb_endpoint: Option<String>,
    pub request_timeout: Duration,
}

/// Builds both clients on one HTTP connection pool.
///
/// # Errors
///
/// Returns an error when an endpoint override is not a valid URL or the HTTP
/// client cannot be built.
pub fn build_clients(settings: &AwsSettings) -> AppResult<(CloudWatchClient, DynamoDbClient)> {
    let http = Client::builder()
        .timeout(settings.request_timeout)
        .build()
        .map_err(|err| AppError::aws(AwsError::BuildClientFailed { source: err }))?;

    let cloudwatch = JsonRpcClient::new(
        http.clone(),
        AwsService::CloudWatch,
        resolve_endpoint(
            AwsService::CloudWatch,
            &settings.region,
            settings.cloudwatch_endpoint.as_deref(),
        )?,
        settings.region.clone(),
        settings.credentials.clone(),
    );
    let dynamodb = JsonRpcClient::new(
        http,
        AwsService::DynamoDb,
        resolve_endpoint(
            AwsService::DynamoDb,
            &settings.region,
            settings.dynamodb_endpoint.as_deref(),
        )?,
        settings.region.clone(),
        settings.credentials.clone(),
    );
    Ok((CloudWatchClient::new(cloudwatch), DynamoDbClient::new(dynamodb)))
}
