
use std::fs;

use serde_json::Value;
use tempfile::tempdir;

use support_aws::{run_tablewatch, spawn_aws_server_or_skip};

fn endpoint_args(url: &str) -> Vec<String> {
    vec![
        "--region".to_owned(),
        "us-east-1".to_owned(),
        "--cloudwatch-endpoint".to_owned(),
        url.to_owned(),
        "--dynamodb-endpoint".to_owned(),
        url.to_owned(),
        "--ingestion-delay".to_owned(),
        "0s".to_owned(),
    ]
}

fn parse_jsonl(text: &str) -> Result<Vec<Value>, String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(|err| format!("bad line {}: {}", line, err)))
        .collect()
}

fn value_of<'points>(points: &'points [Value], name: &str) -> Option<&'points Value> {
    points
        .iter()
        .find(|point| point["reporting_name"] == name)
        .map(|point| &point["value"])
}

fn check_output(output: &std::process::Output) -> Result<(), String> {
    if output.status.success() {
        return Ok(());
    }
    Err(format!(
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    ))
}

#[test]
fn e2e_collect_discovers_tables_and_derives_utilization() -> Result<(), String> {
    let Some((url, _server)) = spawn_aws_server_or_skip()? else {
        return Ok(());
    };
    let mut args = endpoint_args(&url);
    args.extend(["--output-format".to_owned(), "jsonl".to_owned()]);

    let output = run_tablewatch(args)?;
    check_output(&output)?;
    let points = parse_jsonl(&String::from_utf8_lossy(&output.stdout))?;

    if points.iter().any(|point| point["resource_id"] != "orders") {
        return Err(format!("unexpected resource in {:?}", points));
    }
    let table = value_of(&points, "Utilization/ReadUtilization")
        .ok_or("missing table read utilization")?;
    if table.to_string() != "40.0" {
        return Err(format!("table utilization was {}", table));
    }
    let index = value_of(&points, "GSI/Utilization/ReadUtilization/by_date")
        .ok_or("missing index read utilization")?;
    if index.to_string() != "50.0" {
        return Err(format!("index utilization was {}", index));
    }
    if value_of(&points, "Utilization/WriteUtilization").is_some() {
        return Err("write utilization needs provisioned write capacity".to_owned());
    }
    let throttled =
        value_of(&points, "Throttled/ReadThrottleEvents").ok_or("missing throttle default")?;
    if throttled.to_string() != "0.0" {
        return Err(format!("throttle default was {}", throttled));
    }
    Ok(())
}

#[test]
fn e2e_collect_writes_explicit_tables_to_file() -> Result<(), String> {
    let Some((url, _server)) = spawn_aws_server_or_skip()? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("points.json");

    let mut args = endpoint_args(&url);
    args.extend([
        "--table".to_owned(),
        "invoices".to_owned(),
        "--output-format".to_owned(),
        "json".to_owned(),
        "--output".to_owned(),
        path.to_string_lossy().into_owned(),
    ]);

    let output = run_tablewatch(args)?;
    check_output(&output)?;
    if !output.stdout.is_empty() {
        return Err("stdout must stay empty when writing to a file".to_owned());
    }
    let content = fs::read_to_string(&path).map_err(|err| format!("read output failed: {}", err))?;
    let points: Vec<Value> =
        serde_json::from_str(&content).map_err(|err| format!("parse output failed: {}", err))?;
    if points.is_empty() {
        return Err("expected data points".to_owned());
    }
    if points.iter().any(|point| point["resource_id"] != "invoices") {
        return Err(format!("unexpected resource in {:?}", points));
    }
    Ok(())
}

#[test]
fn e2e_collect_fails_without_region() -> Result<(), String> {
    let output = run_tablewatch(["--table", "orders"])?;
    if output.status.success() {
        return Err("expected failure without a region".to_owned());
    }
    Ok(())
}
