use std::path::Path;

use async_trait::async_trait;

use crate::errors::GestorError;

/// Reads and writes the serialized collection snapshots as files. This is the
/// only asynchronous boundary in the crate; everything behind the key-value
/// store stays synchronous.
#[async_trait]
pub(crate) trait SnapshotFileDatasource {
    async fn read<P>(&self, path: P) -> Result<String, GestorError>
    where
        P: AsRef<Path> + Send;

    async fn write<P>(&self, path: P, contents: &str) -> Result<(), GestorError>
    where
        P: AsRef<Path> + Send;
}

pub(crate) struct SnapshotFileDatasourceImpl;

impl SnapshotFileDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SnapshotFileDatasource for SnapshotFileDatasourceImpl {
    async fn read<P>(&self, path: P) -> Result<String, GestorError>
    where
        P: AsRef<Path> + Send,
    {
        Ok(tokio::fs::read_to_string(path).await?)
    }

    async fn write<P>(&self, path: P, contents: &str) -> Result<(), GestorError>
    where
        P: AsRef<Path> + Send,
    {
        Ok(tokio::fs::write(path, contents).await?)
    }
}
