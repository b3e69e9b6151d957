//! Local filesystem adapter using std::fs.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use nextrails_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{NextRailsError, NextRailsResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn read_to_string(&self, path: &Path) -> NextRailsResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> NextRailsResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn append(&self, path: &Path, content: &str) -> NextRailsResult<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| map_io_error(path, e, "open file for appending"))?;
        file.write_all(content.as_bytes())
            .map_err(|e| map_io_error(path, e, "append to file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> NextRailsResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> NextRailsError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
