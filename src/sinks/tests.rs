use tempfile::tempdir;

use super::{OutputReporter, render};
use crate::args::OutputFormat;
use crate::catalog::Unit;
use crate::collector::Reporter;
use crate::error::{AppError, AppResult};
use crate::metrics::{DataPoint, PointKey, ResourceId, Scope};

fn points() -> Vec<DataPoint> {
    vec![
        DataPoint {
            resource_id: ResourceId::new("orders"),
            reporting_name: "Capacity/Read/ProvisionedReadCapacityUnits".to_owned(),
            unit: Unit::Count,
            value: 300.0,
            key: PointKey {
                metric: "ProvisionedReadCapacityUnits",
                scope: Scope::Table,
            },
        },
        DataPoint {
            resource_id: ResourceId::new("orders"),
            reporting_name: "Utilization/ReadUtilization".to_owned(),
            unit: Unit::Percent,
            value: 40.0,
            key: PointKey {
                metric: "Utilization/ReadUtilization",
                scope: Scope::Table,
            },
        },
    ]
}

#[test]
fn text_output_is_tab_separated() -> AppResult<()> {
    let rendered = render(OutputFormat::Text, &points())?;
    let expected = "orders\tCapacity/Read/ProvisionedReadCapacityUnits\t300\tCount\n\
                    orders\tUtilization/ReadUtilization\t40\tPercent\n";
    if rendered != expected {
        return Err(AppError::sink(format!("unexpected text: {}", rendered)));
    }
    Ok(())
}

#[test]
fn jsonl_output_has_one_object_per_point() -> AppResult<()> {
    let rendered = render(OutputFormat::Jsonl, &points())?;
    let lines: Vec<serde_json::Value> = rendered
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    let [first, second] = lines.as_slice() else {
        return Err(AppError::sink("expected two lines"));
    };
    if first["reporting_name"] != "Capacity/Read/ProvisionedReadCapacityUnits" {
        return Err(AppError::sink(format!("unexpected first: {}", first)));
    }
    if second["unit"] != "Percent" || second.get("key").is_some() {
        return Err(AppError::sink(format!("unexpected second: {}", second)));
    }
    Ok(())
}

#[test]
fn empty_pass_renders_empty_json_array() -> AppResult<()> {
    if render(OutputFormat::Json, &[])? != "[]\n" {
        return Err(AppError::sink("expected empty array"));
    }
    if !render(OutputFormat::Text, &[])?.is_empty() {
        return Err(AppError::sink("expected no text lines"));
    }
    Ok(())
}

#[tokio::test]
async fn reporter_writes_file() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("points.json");
    let reporter = OutputReporter::new(OutputFormat::Json, Some(path.clone()));
    reporter.report(&points()).await?;

    let written = std::fs::read_to_string(&path)?;
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&written)?;
    if parsed.len() != 2 {
        return Err(AppError::sink(format!("unexpected file: {}", written)));
    }
    Ok(())
}
