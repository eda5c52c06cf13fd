//! # Local Filesystem Backend

use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{BackendError, BackendResult};
use super::StorageBackend;

/// Suffix of the scratch file a write goes through before the rename
const TEMP_SUFFIX: &str = ".tmp";

/// Local filesystem backend with one file per key
#[derive(Debug)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    /// Create a new local backend rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn full_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Directory to scan; an empty root means the working directory
    fn root_dir(&self) -> &Path {
        if self.root.as_os_str().is_empty() {
            Path::new(".")
        } else {
            &self.root
        }
    }
}

impl StorageBackend for LocalBackend {
    fn read(&self, key: &str) -> BackendResult<Vec<u8>> {
        fs::read(self.full_path(key)).map_err(|e| BackendError::from_io(key, e))
    }

    fn write(&self, key: &str, data: &[u8]) -> BackendResult<()> {
        let full_path = self.full_path(key);

        if !self.root.as_os_str().is_empty() && !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|e| BackendError::Io(e.to_string()))?;
        }

        // Whole-file replace: write aside, then rename over the target
        let temp_path = self.full_path(&format!("{}{}", key, TEMP_SUFFIX));
        fs::write(&temp_path, data)
            .and_then(|()| fs::rename(&temp_path, &full_path))
            .map_err(|e| {
                let _ = fs::remove_file(&temp_path);
                BackendError::Io(e.to_string())
            })
    }

    fn delete(&self, key: &str) -> BackendResult<()> {
        fs::remove_file(self.full_path(key)).map_err(|e| BackendError::from_io(key, e))
    }

    fn exists(&self, key: &str) -> BackendResult<bool> {
        Ok(self.full_path(key).is_file())
    }

    fn list(&self, prefix: &str) -> BackendResult<Vec<String>> {
        let mut results = Vec::new();

        if !self.root_dir().is_dir() {
            return Ok(results);
        }

        let entries = fs::read_dir(self.root_dir()).map_err(|e| BackendError::Io(e.to_string()))?;
        for entry in entries.flatten() {
            if !entry.path().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.starts_with(prefix) && !name.ends_with(TEMP_SUFFIX) {
                    results.push(name.to_string());
                }
            }
        }

        results.sort();
        Ok(results)
    }
}
