use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;

use super::backend::{FileStat, WorkspaceFs};

/// Local filesystem backend rooted at one directory
///
/// Every path is resolved inside the root; anything that escapes it is
/// rejected before touching the disk.
pub struct LocalFs {
    root: PathBuf,
}

impl LocalFs {
    /// Create a backend rooted at `root` (which must already exist)
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let canonical = root
            .canonicalize()
            .map_err(|e| anyhow!("Cannot open workspace {}: {e}", root.display()))?;
        if !canonical.is_dir() {
            bail!("Not a directory: {}", canonical.display());
        }
        Ok(Self { root: canonical })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative path to an absolute one inside the root
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        if path.contains('\\') {
            bail!("Invalid path {path}: backslashes not allowed");
        }
        let target = self.root.join(path.trim_start_matches('/'));

        let resolved = if target.exists() {
            target.canonicalize()?
        } else {
            let parent = target
                .parent()
                .ok_or_else(|| anyhow!("Invalid path: no parent"))?
                .canonicalize()?;
            parent.join(
                target
                    .file_name()
                    .ok_or_else(|| anyhow!("Invalid path: no filename"))?,
            )
        };

        if !resolved.starts_with(&self.root) {
            bail!(
                "Path traversal blocked: {} escapes workspace {}",
                path,
                self.root.display()
            );
        }

        Ok(resolved)
    }
}

#[async_trait]
impl WorkspaceFs for LocalFs {
    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let resolved = self.resolve(path)?;
        tokio::task::spawn_blocking(move || fs::read(resolved).map_err(Into::into)).await?
    }

    async fn write(&self, path: &str, data: &[u8]) -> Result<()> {
        let resolved = self.resolve(path)?;
        let data = data.to_vec();
        tokio::task::spawn_blocking(move || fs::write(resolved, data).map_err(Into::into)).await?
    }

    async fn stat(&self, path: &str) -> Result<FileStat> {
        let resolved = self.resolve(path)?;
        tokio::task::spawn_blocking(move || {
            let meta = fs::metadata(&resolved)?;
            Ok(if meta.is_dir() {
                FileStat::dir()
            } else {
                FileStat::file(meta.len())
            })
        })
        .await?
    }

    async fn list(&self, path: &str) -> Result<Vec<String>> {
        let resolved = self.resolve(path)?;
        tokio::task::spawn_blocking(move || {
            let mut entries = Vec::new();
            for entry in fs::read_dir(resolved)? {
                let entry = entry?;
                entries.push(entry.file_name().to_string_lossy().into_owned());
            }
            entries.sort();
            Ok(entries)
        })
        .await?
    }
}
