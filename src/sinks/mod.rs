//! Output of a collection pass: the reporting client handed the flat points.
mod format;
mod writers;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::args::OutputFormat;
use crate::collector::Reporter;
use crate::error::AppResult;
use crate::metrics::DataPoint;

pub use format::render;

/// Writes points to stdout or a file in the configured format.
#[derive(Debug, Clone)]
pub struct OutputReporter {
    format: OutputFormat,
    path: Option<PathBuf>,
}

impl OutputReporter {
    #[must_use]
    pub const fn new(format: OutputFormat, path: Option<PathBuf>) -> Self {
        Self { format, path }
    }
}

#[async_trait]
impl Reporter for OutputReporter {
    async fn report(&self, points: &[DataPoint]) -> AppResult<()> {
        let rendered = render(self.format, points)?;
        match self.path.as_deref() {
            Some(path) => {
                writers::write_file(path, &rendered).await?;
                info!("Wrote {} data points to {}", points.len(), path.display());
            }
            None => writers::write_stdout(&rendered).await?,
        }
        Ok(())
    }
}
