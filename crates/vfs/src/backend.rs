use anyhow::{Context, Result};
use async_trait::async_trait;

/// File metadata returned by stat operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub is_file: bool,
    pub is_dir: bool,
    pub size: u64,
}

impl FileStat {
    pub fn file(size: u64) -> Self {
        Self {
            is_file: true,
            is_dir: false,
            size,
        }
    }

    pub fn dir() -> Self {
        Self {
            is_file: false,
            is_dir: true,
            size: 0,
        }
    }
}

/// Filesystem trait - every document read and write goes through this
///
/// Paths are relative to the backend root and use `/` separators. Reading
/// and writing are the two suspension points of a command; each write
/// replaces the whole document (last writer wins).
#[async_trait]
pub trait WorkspaceFs: Send + Sync {
    /// Read entire file contents
    async fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Write entire file contents (create or overwrite)
    async fn write(&self, path: &str, data: &[u8]) -> Result<()>;

    /// Get file/directory metadata
    async fn stat(&self, path: &str) -> Result<FileStat>;

    /// List directory contents (basenames only)
    async fn list(&self, path: &str) -> Result<Vec<String>>;

    /// Read a document as UTF-8 text
    async fn read_to_string(&self, path: &str) -> Result<String> {
        let bytes = self.read(path).await?;
        String::from_utf8(bytes).with_context(|| format!("{path} is not valid UTF-8"))
    }
}
