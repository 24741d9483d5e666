use std::fmt::Write as _;

use crate::args::OutputFormat;
use crate::error::{AppError, AppResult, SinkError};
use crate::metrics::DataPoint;

/// Renders points in `format`; every format ends with a newline unless empty.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(format: OutputFormat, points: &[DataPoint]) -> AppResult<String> {
    let mut output = String::new();
    match format {
        OutputFormat::Text => {
            for point in points {
                write_line(
                    &mut output,
                    &format!(
                        "{}\t{}\t{}\t{}",
                        point.resource_id, point.reporting_name, point.value, point.unit
                    ),
                )?;
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(points)
                .map_err(|err| AppError::sink(SinkError::SerializeJson { source: err }))?;
            write_line(&mut output, &json)?;
        }
        OutputFormat::Jsonl => {
            for point in points {
                let json = serde_json::to_string(point)
                    .map_err(|err| AppError::sink(SinkError::SerializeJson { source: err }))?;
                write_line(&mut output, &json)?;
            }
        }
    }
    Ok(output)
}

fn write_line(output: &mut String, line: &str) -> AppResult<()> {
    writeln!(output, "{}", line).map_err(|err| AppError::sink(SinkError::WriteLine { source: err }))
}
