use std::io::ErrorKind;
use std::path::Path;

use crate::usecase::ports::store::{FileStore, StoreError};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

impl FileStore for LocalFileStore {
    fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        std::fs::read(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => StoreError::NotFound(path.display().to_string()),
            _ => StoreError::Io(format!("failed to read {}: {err}", path.display())),
        })
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        std::fs::write(path, bytes)
            .map_err(|err| StoreError::Io(format!("failed to write {}: {err}", path.display())))
    }
}
