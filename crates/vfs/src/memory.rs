//! In-memory filesystem backend for testing
//!
//! Lets command tests run the full read-compute-write cycle without disk I/O.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;

use super::backend::{FileStat, WorkspaceFs};

#[derive(Clone, Debug)]
enum MemoryEntry {
    File(Vec<u8>),
    Directory,
}

/// In-memory filesystem backend
///
/// Thread-safe via internal `RwLock`. Counts writes so tests can check that
/// untouched documents are never rewritten.
#[derive(Clone)]
pub struct MemoryFs {
    entries: Arc<RwLock<BTreeMap<String, MemoryEntry>>>,
    writes: Arc<RwLock<Vec<String>>>,
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFs {
    /// Create a new empty in-memory filesystem
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert("/".to_string(), MemoryEntry::Directory);
        Self {
            entries: Arc::new(RwLock::new(entries)),
            writes: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create with initial text files
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let fs = Self::new();
        if let Ok(mut entries) = fs.entries.write() {
            for (path, content) in files {
                let path = Self::normalize_path(path);
                Self::insert_parents(&mut entries, &path);
                entries.insert(path, MemoryEntry::File(content.as_bytes().to_vec()));
            }
        }
        fs
    }

    /// Paths written since creation, in order
    pub fn writes(&self) -> Vec<String> {
        self.writes
            .read()
            .map(|writes| writes.clone())
            .unwrap_or_default()
    }

    /// Current text of a file, if present
    pub fn contents(&self, path: &str) -> Option<String> {
        let entries = self.entries.read().ok()?;
        match entries.get(&Self::normalize_path(path))? {
            MemoryEntry::File(data) => String::from_utf8(data.clone()).ok(),
            MemoryEntry::Directory => None,
        }
    }

    /// Normalize path (leading /, no trailing /)
    fn normalize_path(path: &str) -> String {
        let path = path.trim().trim_matches('/');
        if path.is_empty() {
            "/".to_string()
        } else {
            format!("/{path}")
        }
    }

    fn insert_parents(entries: &mut BTreeMap<String, MemoryEntry>, path: &str) {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut current = String::new();
        for part in &parts[..parts.len().saturating_sub(1)] {
            current = format!("{current}/{part}");
            entries
                .entry(current.clone())
                .or_insert(MemoryEntry::Directory);
        }
    }
}

#[async_trait]
impl WorkspaceFs for MemoryFs {
    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let path = Self::normalize_path(path);
        let entries = self.entries.read().map_err(|_| anyhow!("Lock poisoned"))?;

        match entries.get(&path) {
            Some(MemoryEntry::File(data)) => Ok(data.clone()),
            Some(MemoryEntry::Directory) => bail!("Cannot read directory: {path}"),
            None => bail!("File not found: {path}"),
        }
    }

    async fn write(&self, path: &str, data: &[u8]) -> Result<()> {
        let path = Self::normalize_path(path);
        {
            let mut entries = self.entries.write().map_err(|_| anyhow!("Lock poisoned"))?;
            if matches!(entries.get(&path), Some(MemoryEntry::Directory)) {
                bail!("Cannot write directory: {path}");
            }
            Self::insert_parents(&mut entries, &path);
            entries.insert(path.clone(), MemoryEntry::File(data.to_vec()));
        }
        self.writes
            .write()
            .map_err(|_| anyhow!("Lock poisoned"))?
            .push(path);
        Ok(())
    }

    async fn stat(&self, path: &str) -> Result<FileStat> {
        let path = Self::normalize_path(path);
        let entries = self.entries.read().map_err(|_| anyhow!("Lock poisoned"))?;

        match entries.get(&path) {
            Some(MemoryEntry::File(data)) => Ok(FileStat::file(data.len() as u64)),
            Some(MemoryEntry::Directory) => Ok(FileStat::dir()),
            None => bail!("Not found: {path}"),
        }
    }

    async fn list(&self, path: &str) -> Result<Vec<String>> {
        let path = Self::normalize_path(path);
        let entries = self.entries.read().map_err(|_| anyhow!("Lock poisoned"))?;

        match entries.get(&path) {
            Some(MemoryEntry::Directory) => {}
            Some(MemoryEntry::File(_)) => bail!("Not a directory: {path}"),
            None => bail!("Directory not found: {path}"),
        }

        let prefix = if path == "/" {
            "/".to_string()
        } else {
            format!("{path}/")
        };

        // BTreeMap keys come out sorted
        Ok(entries
            .keys()
            .filter_map(|key| key.strip_prefix(&prefix))
            .filter(|rest| !rest.is_empty() && !rest.contains('/'))
            .map(String::from)
            .collect())
    }
}
