//! Filesystem abstraction and implementations.
//!
//! [`NativeFileSystem`] is backed by [`tokio::fs`]. [`MemoryFileSystem`]
//! keeps files in a map and can be switched read-only to simulate write
//! failures.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

/// Platform-agnostic filesystem operations.
///
/// Writers create parent directories as needed and overwrite whole files.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Read a file's entire contents as UTF-8.
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write a string to a file, creating parent directories if needed.
    ///
    /// Overwrites the file if it already exists.
    async fn write_string(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check whether a path exists.
    async fn exists(&self, path: &Path) -> bool;

    /// The user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Native filesystem implementation using [`tokio::fs`].
pub struct NativeFileSystem;

#[async_trait]
impl FileSystem for NativeFileSystem {
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn write_string(&self, path: &Path, content: &str) -> io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content).await
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

/// In-memory filesystem.
///
/// Cloning shares the underlying files, so a test can keep a handle and
/// inspect what a store wrote.
#[derive(Clone, Default)]
pub struct MemoryFileSystem {
    inner: Arc<Mutex<MemoryFsState>>,
}

#[derive(Default)]
struct MemoryFsState {
    files: HashMap<PathBuf, String>,
    read_only: bool,
    writes: usize,
}

impl MemoryFileSystem {
    /// Empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// When read-only, every write fails with `PermissionDenied`.
    pub fn set_read_only(&self, read_only: bool) {
        self.inner.lock().read_only = read_only;
    }

    /// Seed a file.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.inner.lock().files.insert(path.into(), content.into());
    }

    /// Current contents of a file.
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.inner.lock().files.get(path).cloned()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.inner.lock().writes
    }
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.inner.lock().files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }

    async fn write_string(&self, path: &Path, content: &str) -> io::Result<()> {
        let mut state = self.inner.lock();
        if state.read_only {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "filesystem is read-only",
            ));
        }
        state.files.insert(path.to_path_buf(), content.to_string());
        state.writes += 1;
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        self.inner.lock().files.contains_key(path)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        None
    }
}
