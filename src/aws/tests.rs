use std::collections::HashMap;
use std::time::Duration;

use chrono::{TimeZone, Utc};

use super::client::resolve_endpoint;
use super::cloudwatch::{GetMetricStatisticsInput, GetMetricStatisticsOutput};
use super::credentials::AwsCredentials;
use super::dynamodb::{DescribeTableOutput, ListTablesOutput};
use crate::catalog::{Statistic, Unit};
use crate::collector::MetricQuery;
use crate::error::{AppError, AppResult, AwsError, AwsService};
use crate::metrics::{Dimension, DimensionSet, QueryWindow, ResourceId};

#[test]
fn default_endpoints_are_regional() -> AppResult<()> {
    let cloudwatch = resolve_endpoint(AwsService::CloudWatch, "eu-west-1", None)?;
    if cloudwatch.as_str() != "https://monitoring.eu-west-1.amazonaws.com/" {
        return Err(AppError::aws("unexpected CloudWatch endpoint"));
    }
    let dynamodb = resolve_endpoint(AwsService::DynamoDb, "us-east-1", None)?;
    if dynamodb.as_str() != "https://dynamodb.us-east-1.amazonaws.com/" {
        return Err(AppError::aws("unexpected DynamoDB endpoint"));
    }
    let local = resolve_endpoint(
        AwsService::DynamoDb,
        "us-east-1",
        Some("http://127.0.0.1:8000"),
    )?;
    if local.as_str() != "http://127.0.0.1:8000/" {
        return Err(AppError::aws(format!("unexpected override: {}", local)));
    }
    Ok(())
}

#[test]
fn invalid_endpoint_is_rejected() -> AppResult<()> {
    match resolve_endpoint(AwsService::CloudWatch, "us-east-1", Some("not a url")) {
        Err(AppError::Aws(AwsError::InvalidEndpoint { service, .. }))
            if service == AwsService::CloudWatch =>
        {
            Ok(())
        }
        Err(err) => Err(err),
        Ok(_) => Err(AppError::aws("expected invalid endpoint")),
    }
}

#[test]
fn credentials_come_from_lookup() -> AppResult<()> {
    let env: HashMap<&str, &str> = [
        ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
        ("AWS_SECRET_ACCESS_KEY", "secret"),
        ("AWS_SESSION_TOKEN", ""),
    ]
    .into_iter()
    .collect();
    let credentials =
        AwsCredentials::from_lookup(|name| env.get(name).map(|value| (*value).to_owned()))?;
    if credentials.access_key != "AKIDEXAMPLE" || credentials.session_token.is_some() {
        return Err(AppError::aws(format!("unexpected {:?}", credentials)));
    }
    if format!("{:?}", credentials).contains("secret\"") {
        return Err(AppError::aws("secret key must be redacted"));
    }

    match AwsCredentials::from_lookup(|_| None) {
        Err(AppError::Aws(AwsError::MissingCredentials)) => Ok(()),
        Err(err) => Err(err),
        Ok(_) => Err(AppError::aws("expected missing credentials")),
    }
}

#[test]
fn explicit_credentials_win() -> AppResult<()> {
    let credentials = AwsCredentials::resolve(
        Some("AKID".to_owned()),
        Some("secret".to_owned()),
        Some("token".to_owned()),
    )?;
    if credentials.session_token.as_deref() != Some("token") {
        return Err(AppError::aws("expected session token"));
    }
    Ok(())
}

#[test]
fn metric_statistics_request_shape() -> Result<(), String> {
    let now = Utc
        .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .ok_or("Invalid timestamp")?;
    let resource = ResourceId::new("orders");
    let dimensions = DimensionSet::for_resource(&resource)
        .with(Dimension::new("GlobalSecondaryIndexName", "by_user"));
    let query = MetricQuery {
        namespace: "AWS/DynamoDB",
        metric_name: "ConsumedReadCapacityUnits",
        statistic: Statistic::Sum,
        unit: Unit::Count,
        window: QueryWindow::plan(now, None, Duration::from_secs(60)),
        dimensions: &dimensions,
    };
    let body = serde_json::to_value(GetMetricStatisticsInput::from_query(&query))
        .map_err(|err| format!("serialize failed: {}", err))?;
    let expected = serde_json::json!({
        "Namespace": "AWS/DynamoDB",
        "MetricName": "ConsumedReadCapacityUnits",
        "Dimensions": [
            { "Name": "TableName", "Value": "orders" },
            { "Name": "GlobalSecondaryIndexName", "Value": "by_user" }
        ],
        "StartTime": 1_714_564_440,
        "EndTime": 1_714_564_740,
        "Period": 60,
        "Statistics": ["Sum"],
        "Unit": "Count"
    });
    if body != expected {
        return Err(format!("Unexpected body: {}", body));
    }
    Ok(())
}

#[test]
fn latest_datapoint_wins() -> Result<(), String> {
    let output: GetMetricStatisticsOutput = serde_json::from_str(
        r#"{
  "Label": "ConsumedReadCapacityUnits",
  "Datapoints": [
    { "Timestamp": 1714564500, "Sum": 10.0, "Unit": "Count" },
    { "Timestamp": 1714564680, "Sum": 30.0, "Unit": "Count" },
    { "Timestamp": 1714564560, "Sum": 20.0, "Unit": "Count" }
  ]
}"#,
    )
    .map_err(|err| format!("parse failed: {}", err))?;
    if output.latest_value(Statistic::Sum) != Some(30.0) {
        return Err(format!("Unexpected latest: {:?}", output.latest_value(Statistic::Sum)));
    }
    if output.latest_value(Statistic::Average).is_some() {
        return Err("Average was not requested".to_owned());
    }

    let empty: GetMetricStatisticsOutput = serde_json::from_str(r#"{"Datapoints": []}"#)
        .map_err(|err| format!("parse failed: {}", err))?;
    if empty.latest_value(Statistic::Sum).is_some() {
        return Err("Empty window must be no data".to_owned());
    }
    Ok(())
}

#[test]
fn describe_table_lists_global_indexes() -> Result<(), String> {
    let output: DescribeTableOutput = serde_json::from_str(
        r#"{
  "Table": {
    "TableName": "orders",
    "GlobalSecondaryIndexes": [
      { "IndexName": "by_user", "IndexStatus": "ACTIVE" },
      { "IndexName": "by_date", "IndexStatus": "ACTIVE" }
    ]
  }
}"#,
    )
    .map_err(|err| format!("parse failed: {}", err))?;
    if output.index_names() != ["by_user", "by_date"] {
        return Err("Unexpected index names".to_owned());
    }

    let bare: DescribeTableOutput = serde_json::from_str(r#"{"Table": {"TableName": "t"}}"#)
        .map_err(|err| format!("parse failed: {}", err))?;
    if !bare.index_names().is_empty() {
        return Err("Table without indexes must yield none".to_owned());
    }
    Ok(())
}

#[test]
fn list_tables_page_parses() -> Result<(), String> {
    let page: ListTablesOutput = serde_json::from_str(
        r#"{"TableNames": ["a", "b"], "LastEvaluatedTableName": "b"}"#,
    )
    .map_err(|err| format!("parse failed: {}", err))?;
    if page.table_names != ["a", "b"] || page.last_evaluated_table_name.as_deref() != Some("b") {
        return Err(format!("Unexpected page: {:?}", page));
    }
    Ok(())
}
