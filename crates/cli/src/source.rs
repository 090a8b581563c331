//! Standard-input commit source.

use async_trait::async_trait;
use pipeline::{CommitSource, SourceError};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Reads the whole of stdin as the commit payload.
pub struct StdinSource;

#[async_trait]
impl CommitSource for StdinSource {
    async fn read_commits(&self) -> Result<String, SourceError> {
        read_all(tokio::io::stdin(), "stdin").await
    }
}

async fn read_all<R: AsyncRead + Unpin>(mut reader: R, origin: &str) -> Result<String, SourceError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .await
        .map_err(|e| SourceError::Io {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;
    Ok(text)
}
