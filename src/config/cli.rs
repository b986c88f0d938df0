use crate::domain::ports::Storage;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        tracing::debug!(path = %full_path.display(), "Reading file");
        fs::read(full_path)
    }
}
