//! File system abstraction for testability.
//!
//! Uploads read their source buffer through this trait and downloads hand
//! their assembled buffer to it, so controller tests run entirely in memory.

use async_trait::async_trait;
use std::path::Path;

/// Abstraction over the file operations the transfer flows need.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Checks if a file exists at the given path.
    async fn file_exists(&self, path: &Path) -> bool;

    /// Returns the size of a file if it exists.
    async fn file_size(&self, path: &Path) -> Option<u64>;

    /// Reads an entire file into memory.
    async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;

    /// Writes a buffer to a file, creating parent directories as needed.
    async fn write(&self, path: &Path, contents: &[u8]) -> std::io::Result<()>;
}

/// Default file system implementation using `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    /// Creates a new `TokioFileSystem` instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for TokioFileSystem {
    async fn file_exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }

    async fn file_size(&self, path: &Path) -> Option<u64> {
        tokio::fs::metadata(path).await.ok().map(|m| m.len())
    }

    async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn tokio_fs_file_exists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.bin");
        std::fs::write(&path, b"x").unwrap();

        let fs = TokioFileSystem::new();
        assert!(fs.file_exists(&path).await);
        assert!(!fs.file_exists(&dir.path().join("nonexistent.bin")).await);
    }

    #[tokio::test]
    async fn tokio_fs_file_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.bin");
        std::fs::write(&path, b"hello").unwrap();

        let fs = TokioFileSystem::new();
        assert_eq!(fs.file_size(&path).await, Some(5));
        assert_eq!(fs.file_size(&dir.path().join("nonexistent.bin")).await, None);
    }

    #[tokio::test]
    async fn tokio_fs_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.bin");
        std::fs::write(&path, b"payload").unwrap();

        let fs = TokioFileSystem::new();
        assert_eq!(fs.read(&path).await.unwrap(), b"payload");
    }

    #[tokio::test]
    async fn tokio_fs_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/out.bin");

        let fs = TokioFileSystem::new();
        fs.write(&path, b"data").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"data");
    }

    #[tokio::test]
    async fn tokio_fs_write_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.bin");

        let fs = TokioFileSystem::new();
        fs.write(&path, &[]).await.unwrap();
        assert_eq!(fs.file_size(&path).await, Some(0));
    }
}
