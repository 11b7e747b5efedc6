//! Workspace folder detection
//!
//! The workspace folder is the directory a workspace-wide removal walks and
//! the place where the workspace settings file lives.

use std::path::{Path, PathBuf};

use crate::error::CommandError;

/// Find the git root directory by walking up from the given path
///
/// Returns the path containing the `.git` entry, or None if not in a git repo.
/// Relative paths are resolved against the current directory first.
pub fn find_git_root(path: &Path) -> Option<PathBuf> {
    let absolute = absolute(path);
    let mut current = if absolute.is_file() {
        absolute.parent()?
    } else {
        absolute.as_path()
    };

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

/// Resolve the workspace folder for a workspace-wide command
///
/// An explicit folder must exist. Without one, the git repository enclosing
/// `cwd` is used; outside a repository there is no workspace folder.
pub fn resolve_workspace(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf, CommandError> {
    match explicit {
        Some(dir) if dir.is_dir() => Ok(dir.to_path_buf()),
        Some(_) => Err(CommandError::NoWorkspaceFolder),
        None => find_git_root(cwd).ok_or(CommandError::NoWorkspaceFolder),
    }
}

/// Folder whose `.sulog/config.toml` applies to `file`
///
/// The enclosing git root when there is one, else the file's own directory.
pub fn settings_root_for(file: &Path) -> PathBuf {
    let dir = file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    find_git_root(dir).unwrap_or_else(|| absolute(dir))
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
