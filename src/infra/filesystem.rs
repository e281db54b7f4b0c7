//! Filesystem access for the scaffolding commands.

use std::fs;
use std::io;
use std::path::Path;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Filesystem operations the generators need, injectable for tests.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait Filesystem: Send + Sync {
    /// Whether a file or directory exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and all missing parents
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Write `contents` to `path`, replacing any existing file
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}
