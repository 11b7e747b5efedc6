//! Script file discovery across a workspace

use std::path::Path;

use anyhow::Result;

use super::backend::WorkspaceFs;

/// Extensions treated as script files
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "ts", "jsx", "tsx"];

/// Directory names never descended into
pub const SKIPPED_DIRS: &[&str] = &["node_modules"];

pub fn is_script_file(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext))
}

/// Find every script file under `root`, sorted
///
/// Returned paths are relative to the backend root and joined with `/`.
/// Entries that cannot be inspected (dangling links, links leading out of
/// the backend root, unreadable directories) are logged and skipped; only a
/// failure to list `root` itself is an error.
pub async fn find_script_files(fs: &dyn WorkspaceFs, root: &str) -> Result<Vec<String>> {
    let root = root.trim_matches('/').to_string();
    let mut found = Vec::new();
    let mut pending = Vec::new();

    for name in fs.list(&root).await? {
        visit(fs, &root, &name, &mut pending, &mut found).await;
    }
    while let Some(dir) = pending.pop() {
        let names = match fs.list(&dir).await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(path = %dir, error = %e, "Skipping unreadable directory");
                continue;
            }
        };
        for name in names {
            visit(fs, &dir, &name, &mut pending, &mut found).await;
        }
    }

    found.sort();
    Ok(found)
}

async fn visit(
    fs: &dyn WorkspaceFs,
    dir: &str,
    name: &str,
    pending: &mut Vec<String>,
    found: &mut Vec<String>,
) {
    let path = if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    };

    let stat = match fs.stat(&path).await {
        Ok(stat) => stat,
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Skipping entry");
            return;
        }
    };

    if stat.is_dir {
        if SKIPPED_DIRS.contains(&name) {
            tracing::debug!(path = %path, "Skipping dependency directory");
        } else {
            pending.push(path);
        }
    } else if stat.is_file && is_script_file(&path) {
        tracing::debug!(path = %path, size = stat.size, "Found script file");
        found.push(path);
    }
}
