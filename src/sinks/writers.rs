use std::path::Path;

use tokio::io::AsyncWriteExt;

use crate::error::{AppError, AppResult, SinkError};

pub(super) async fn write_file(path: &Path, content: &str) -> AppResult<()> {
    tokio::fs::write(path, content).await.map_err(|err| {
        AppError::sink(SinkError::WriteFile {
            path: path.to_path_buf(),
            source: err,
        })
    })
}

pub(super) async fn write_stdout(content: &str) -> AppResult<()> {
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(content.as_bytes())
        .await
        .map_err(|err| AppError::sink(SinkError::WriteStdout { source: err }))?;
    stdout
        .flush()
        .await
        .map_err(|err| AppError::sink(SinkError::WriteStdout { source: err }))
}
