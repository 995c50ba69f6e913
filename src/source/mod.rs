//! Line source: loads the messages to deliver from a plain text file,
//! one message per line.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("error while opening file '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error while scanning file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    pub fn path(&self) -> &Path {
        match self {
            SourceError::Open { path, .. } | SourceError::Read { path, .. } => path,
        }
    }
}

/// Read every line of `path` in file order.
///
/// Line terminators (`\n` or `\r\n`) are stripped and a missing trailing
/// newline is fine. An empty file yields an empty vector.
pub async fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>, SourceError> {
    let path = path.as_ref();

    let file = File::open(path).await.map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut lines = BufReader::new(file).lines();
    let mut data = Vec::new();

    while let Some(line) = lines.next_line().await.map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })? {
        data.push(line);
    }

    debug!(path = %path.display(), lines = data.len(), "Loaded messages from file");
    Ok(data)
}
