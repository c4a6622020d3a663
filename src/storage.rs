use crate::errors::StorageError;
use crate::models::LogBook;
use std::{future::Future, path::PathBuf};
use tokio::fs;

/// Durable home of the log book. Every save replaces the stored book in full.
pub trait LogStorage: Send + Sync + 'static {
    fn load(&self) -> impl Future<Output = Result<LogBook, StorageError>> + Send;

    fn save(&self, book: &LogBook) -> impl Future<Output = Result<(), StorageError>> + Send;
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sibling file the next save is staged in before it replaces the log.
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl LogStorage for FileStorage {
    async fn load(&self) -> Result<LogBook, StorageError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(LogBook::default()),
            Err(err) => Err(StorageError::Read(err)),
        }
    }

    async fn save(&self, book: &LogBook) -> Result<(), StorageError> {
        let payload = serde_json::to_vec_pretty(book)?;
        let staging = self.staging_path();
        fs::write(&staging, payload)
            .await
            .map_err(StorageError::Write)?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(StorageError::Write)
    }
}
