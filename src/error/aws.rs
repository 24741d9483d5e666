use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwsService {
    CloudWatch,
    DynamoDb,
}

impl fmt::Display for AwsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AwsService::CloudWatch => f.write_str("CloudWatch"),
            AwsService::DynamoDb => f.write_str("DynamoDB"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AwsError {
    #[error("Missing AWS credentials (set access_key/secret_key or AWS_ACCESS_KEY_ID/AWS_SECRET_ACCESS_KEY).")]
    MissingCredentials,
    #[error("Missing AWS region (set --region, region in config, or AWS_REGION).")]
    MissingRegion,
    #[error("Invalid {service} endpoint '{url}': {source}")]
    InvalidEndpoint {
        service: AwsService,
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to build sigv4 params: {source}")]
    SigV4Params {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Failed to build sigv4 request: {source}")]
    SigV4Request {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Failed to sign request: {source}")]
    SigV4Sign {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Failed to build sign request: {source}")]
    SigV4BuildSign {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Failed to encode {service} {operation} request: {source}")]
    EncodeRequest {
        service: AwsService,
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{service} {operation} request failed: {source}")]
    RequestFailed {
        service: AwsService,
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} {operation} returned HTTP {status}: {body}")]
    UnexpectedStatus {
        service: AwsService,
        operation: &'static str,
        status: u16,
        body: String,
    },
    #[error("Failed to decode {service} {operation} response: {source}")]
    DecodeResponse {
        service: AwsService,
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
