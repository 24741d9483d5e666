use reqwest::{Client, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::error::{AppError, AppResult, AwsError, AwsService};

use super::credentials::AwsCredentials;
use super::signing::{SigningTarget, sign_request};

const JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.0";

const fn target_prefix(service: AwsService) -> &'static str {
    match service {
        AwsService::CloudWatch => "GraniteServiceVersion20100801",
        AwsService::DynamoDb => "DynamoDB_20120810",
    }
}

const fn signing_name(service: AwsService) -> &'static str {
    match service {
        AwsService::CloudWatch => "monitoring",
        AwsService::DynamoDb => "dynamodb",
    }
}

/// Regional endpoint for `service`, unless `override_url` is given.
pub(super) fn resolve_endpoint(
    service: AwsService,
    region: &str,
    override_url: Option<&str>,
) -> AppResult<Url> {
    let url = override_url.map_or_else(
        || format!("https://{}.{}.amazonaws.com/", signing_name(service), region),
        str::to_owned,
    );
    Url::parse(&url).map_err(|err| {
        AppError::aws(AwsError::InvalidEndpoint {
            service,
            url,
            source: err,
        })
    })
}

/// Minimal JSON 1.0 protocol client: one signed POST per operation.
#[derive(Debug, Clone)]
pub(crate) struct JsonRpcClient {
    http: Client,
    service: AwsService,
    endpoint: Url,
    region: String,
    credentials: AwsCredentials,
}

impl JsonRpcClient {
    pub(crate) const fn new(
        http: Client,
        service: AwsService,
        endpoint: Url,
        region: String,
        credentials: AwsCredentials,
    ) -> Self {
        Self {
            http,
            service,
            endpoint,
            region,
            credentials,
        }
    }

    pub(crate) async fn call<Req, Resp>(
        &self,
        operation: &'static str,
        request: &Req,
    ) -> AppResult<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let service = self.service;
        let body = serde_json::to_vec(request).map_err(|err| {
            AppError::aws(AwsError::EncodeRequest {
                service,
                operation,
                source: err,
            })
        })?;
        let headers = [
            ("content-type", JSON_CONTENT_TYPE.to_owned()),
            (
                "x-amz-target",
                format!("{}.{}", target_prefix(service), operation),
            ),
        ];

        let mut builder = self.http.post(self.endpoint.clone());
        for (key, value) in &headers {
            builder = builder.header(*key, value);
        }
        builder = sign_request(
            builder,
            &self.endpoint,
            &headers,
            &body,
            &SigningTarget {
                credentials: &self.credentials,
                region: &self.region,
                service: signing_name(service),
            },
        )?;

        let response = builder.body(body).send().await.map_err(|err| {
            AppError::aws(AwsError::RequestFailed {
                service,
                operation,
                source: err,
            })
        })?;
        let status = response.status();
        let text = response.text().await.map_err(|err| {
            AppError::aws(AwsError::RequestFailed {
                service,
                operation,
                source: err,
            })
        })?;
        trace!("{} {} -> {}: {}", service, operation, status, text);
        if !status.is_success() {
            return Err(AppError::aws(AwsError::UnexpectedStatus {
                service,
                operation,
                status: status.as_u16(),
                body: text,
            }));
        }
        serde_json::from_str(&text).map_err(|err| {
            AppError::aws(AwsError::DecodeResponse {
                service,
                operation,
                source: err,
            })
        })
    }
}
