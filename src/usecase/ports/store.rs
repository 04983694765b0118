use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(String),
    Io(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(path) => write!(f, "file not found: {path}"),
            StoreError::Io(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Raw byte access to the files the user opens and saves.
pub trait FileStore: Send + Sync {
    fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError>;
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError>;
}
