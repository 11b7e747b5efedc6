//! Settings file locations for sulog
//!
//! User settings: ~/.config/sulog/config.toml
//! Workspace settings: <workspace>/.sulog/config.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const DEFAULT_CONFIG: &str = r##"# sulog configuration
#
# A workspace can override any of these in <workspace>/.sulog/config.toml

[sulog]
# Informational only; bind it in your editor
consoleShortcut = "cmd+shift+l"
# Marker used to tag inserted statements and to find them again
consolePrefix = "sulog"
# Prefix style; set to "" to drop a declaration
consoleTextColor = "#fff"
consoleBackgroundColor = "#ff4e20"
# Label style
consoleFontSize = "14px"
consoleFontWeight = "bold"
# Log several selected variables as one object instead of one call each
mergeMultiVariables = true
"##;

/// Default user settings path
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sulog")
        .join("config.toml")
}

/// Workspace settings path under `root`
pub fn workspace_config_path(root: &Path) -> PathBuf {
    root.join(".sulog").join("config.toml")
}

/// Write the commented default file if `path` does not exist yet
///
/// Returns whether a file was created.
pub fn create_default_if_missing(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}
