//! File system utility functions
//!
//! Existence checks, path resolution and reads with proper error mapping.

use crate::error::{DeployError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, instrument};

/// Utility struct for file system operations
#[derive(Debug)]
pub struct FileSystemUtils;

impl FileSystemUtils {
    /// Create a new file system utilities instance
    pub fn new() -> Self {
        Self
    }

    /// Fail with [`DeployError::FileNotFound`] on the first path that does not exist
    #[instrument(skip(self))]
    pub fn ensure_exists(&self, paths: &[&Path]) -> Result<()> {
        for path in paths {
            if !path.exists() {
                error!("Input file does not exist: {}", path.display());
                return Err(DeployError::file_not_found(*path));
            }
            debug!("Found file: {}", path.display());
        }
        Ok(())
    }

    /// Resolve a path against the current directory without touching symlinks
    pub fn absolute<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        let path = path.as_ref();
        std::path::absolute(path).map_err(|e| DeployError::file_system("resolve", path, e))
    }

    /// Read file contents as string
    #[instrument(skip(self))]
    pub fn read_file_to_string<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> Result<String> {
        let path = path.as_ref();
        debug!("Reading file: {}", path.display());
        fs::read_to_string(path).map_err(|e| DeployError::file_system("read", path, e))
    }
}

impl Default for FileSystemUtils {
    fn default() -> Self {
        Self::new()
    }
}
