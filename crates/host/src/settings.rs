//! File-backed settings store
//!
//! Reads the user file, then the workspace file on top of it. Nothing is
//! cached: every `load` goes back to disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sulog_core::{Error, RawSettings, SettingsStore};

use crate::config::{default_config_path, workspace_config_path};

/// Layered TOML settings files, lowest precedence first
#[derive(Debug, Clone)]
pub struct FileSettings {
    paths: Vec<PathBuf>,
}

impl FileSettings {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// User file (or `user_override`) plus the workspace file under `workspace_root`
    pub fn discover(user_override: Option<PathBuf>, workspace_root: Option<&Path>) -> Self {
        let mut paths = vec![user_override.unwrap_or_else(default_config_path)];
        paths.extend(workspace_root.map(workspace_config_path));
        Self { paths }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    fn load_file(path: &Path) -> sulog_core::Result<RawSettings> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(RawSettings::default()),
            Err(source) => {
                return Err(Error::ReadSettings {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        RawSettings::from_toml_str(&content).map_err(|e| match e {
            Error::Settings(source) => Error::ParseSettings {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }
}

impl SettingsStore for FileSettings {
    fn load(&self) -> sulog_core::Result<RawSettings> {
        let mut merged = RawSettings::default();
        for path in &self.paths {
            let layer = Self::load_file(path)?;
            tracing::debug!(path = %path.display(), "Loaded settings layer");
            merged = merged.merge(layer);
        }
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use sulog_core::Configuration;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_files_give_defaults() {
        let dir = tempdir().unwrap();
        let settings = FileSettings::discover(Some(dir.path().join("none.toml")), Some(dir.path()));

        assert_eq!(settings.paths().len(), 2);
        assert_eq!(
            Configuration::resolve(&settings).unwrap(),
            Configuration::default()
        );
    }

    #[test]
    fn test_workspace_overrides_user() {
        let dir = tempdir().unwrap();
        let user = dir.path().join("user.toml");
        std::fs::write(
            &user,
            "[sulog]\nconsolePrefix = \"user\"\nconsoleFontSize = \"12px\"\n",
        )
        .unwrap();
        std::fs::create_dir(dir.path().join(".sulog")).unwrap();
        std::fs::write(
            dir.path().join(".sulog/config.toml"),
            "[sulog]\nconsolePrefix = \"ws\"\n",
        )
        .unwrap();

        let settings = FileSettings::discover(Some(user), Some(dir.path()));
        let config = Configuration::resolve(&settings).unwrap();
        assert_eq!(config.prefix, "ws");
        assert_eq!(config.font_size, "12px");
    }

    #[test]
    fn test_malformed_file_names_path() {
        let dir = tempdir().unwrap();
        let user = dir.path().join("broken.toml");
        std::fs::write(&user, "[sulog\n").unwrap();

        let err = FileSettings::new(vec![user]).load().unwrap_err();
        assert!(matches!(err, Error::ParseSettings { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_changes_are_picked_up() {
        let dir = tempdir().unwrap();
        let user = dir.path().join("config.toml");
        let settings = FileSettings::new(vec![user.clone()]);

        assert_eq!(Configuration::resolve(&settings).unwrap().prefix, "sulog");
        std::fs::write(&user, "[sulog]\nconsolePrefix = \"later\"\n").unwrap();
        assert_eq!(Configuration::resolve(&settings).unwrap().prefix, "later");
    }
}
