use std::path::{Path, PathBuf};
use std::sync::Arc;

use sulog_core::{MemorySettings, RawSettings, SettingsStore};
use sulog_host::commands::{CommandContext, DocumentRef, WorkspaceRef};
use sulog_host::notify::RecordingNotifier;
use sulog_vfs::{LocalFs, MemoryFs};
use tempfile::TempDir;

/// A temporary workspace folder on disk
pub struct TestHarness {
    pub tmp_dir: TempDir,
}

impl TestHarness {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            tmp_dir: TempDir::new()?,
        })
    }

    pub fn root(&self) -> &Path {
        self.tmp_dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.tmp_dir.path().join(relative)
    }

    pub fn write_file(&self, relative: &str, content: &str) -> std::io::Result<()> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
    }

    pub fn read_file(&self, relative: &str) -> std::io::Result<String> {
        std::fs::read_to_string(self.path(relative))
    }

    pub fn local_fs(&self) -> Arc<LocalFs> {
        Arc::new(LocalFs::new(self.root()).expect("temp dir is a directory"))
    }
}

/// In-memory files, settings and notifications wired into a command context
pub struct MemoryRig {
    pub fs: MemoryFs,
    pub settings: Arc<MemorySettings>,
    pub notifier: Arc<RecordingNotifier>,
}

impl MemoryRig {
    pub fn new(files: &[(&str, &str)]) -> Self {
        Self {
            fs: MemoryFs::with_files(files),
            settings: Arc::new(MemorySettings::default()),
            notifier: Arc::new(RecordingNotifier::default()),
        }
    }

    #[must_use]
    pub fn with_settings(self, settings: RawSettings) -> Self {
        self.settings.set(settings);
        self
    }

    pub fn context(&self) -> CommandContext {
        self.context_with(false)
    }

    pub fn dry_run_context(&self) -> CommandContext {
        self.context_with(true)
    }

    fn context_with(&self, dry_run: bool) -> CommandContext {
        CommandContext {
            settings: Arc::clone(&self.settings) as Arc<dyn SettingsStore>,
            notifier: self.notifier.clone(),
            dry_run,
        }
    }

    pub fn document(&self, path: &str) -> DocumentRef {
        DocumentRef::new(Arc::new(self.fs.clone()), path)
    }

    pub fn workspace(&self) -> WorkspaceRef {
        WorkspaceRef::new(Arc::new(self.fs.clone()), "project")
    }

    pub fn contents(&self, path: &str) -> String {
        self.fs.contents(path).unwrap_or_default()
    }
}
