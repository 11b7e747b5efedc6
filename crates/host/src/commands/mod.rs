//! Command handlers
//!
//! [`execute`] is the outermost boundary: whatever goes wrong inside a
//! command ends up as a notification and an [`Outcome::Failed`], never as an
//! error returned to the caller.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use sulog_core::{Selection, SettingsStore};
use sulog_vfs::{LocalFs, WorkspaceFs};

use crate::error::CommandError;
use crate::notify::Notifier;

pub mod hello;
pub mod insert;
pub mod remove;

pub use insert::InsertOutcome;
pub use remove::{FileReport, WorkspaceReport};

pub const SAY_HELLO: &str = "sulog.sayHello";
pub const INSERT_CONSOLE: &str = "sulog.insertConsole";
pub const REMOVE_CONSOLES: &str = "sulog.removeConsoles";

/// A document open for editing: a path inside a filesystem backend
#[derive(Clone)]
pub struct DocumentRef {
    pub fs: Arc<dyn WorkspaceFs>,
    pub path: String,
    /// How the document is named in messages
    pub label: String,
}

impl std::fmt::Debug for DocumentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentRef")
            .field("path", &self.path)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl DocumentRef {
    pub fn new(fs: Arc<dyn WorkspaceFs>, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            fs,
            label: path.clone(),
            path,
        }
    }

    /// A file on disk, reached through a backend rooted at its directory
    pub fn open_local(file: &Path) -> anyhow::Result<Self> {
        let dir = file
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let name = file
            .file_name()
            .with_context(|| format!("{} is not a file", file.display()))?
            .to_string_lossy()
            .into_owned();

        let fs = LocalFs::new(dir).with_context(|| format!("Failed to open {}", file.display()))?;
        Ok(Self::new(Arc::new(fs), name).with_label(file.display().to_string()))
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// An open workspace folder
#[derive(Clone)]
pub struct WorkspaceRef {
    pub fs: Arc<dyn WorkspaceFs>,
    /// Folder inside the backend to walk ("" for its root)
    pub root: String,
    pub label: String,
}

impl WorkspaceRef {
    pub fn new(fs: Arc<dyn WorkspaceFs>, label: impl Into<String>) -> Self {
        Self {
            fs,
            root: String::new(),
            label: label.into(),
        }
    }

    /// A folder on disk
    pub fn open_local(root: &Path) -> anyhow::Result<Self> {
        let fs = LocalFs::new(root).with_context(|| format!("Failed to open {}", root.display()))?;
        Ok(Self::new(Arc::new(fs), root.display().to_string()))
    }
}

/// Everything a command reads besides its own arguments
#[derive(Clone)]
pub struct CommandContext {
    pub settings: Arc<dyn SettingsStore>,
    pub notifier: Arc<dyn Notifier>,
    /// Compute results without writing any document
    pub dry_run: bool,
}

pub enum Command {
    SayHello {
        name: Option<String>,
    },
    InsertConsole {
        document: Option<DocumentRef>,
        selection: Selection,
        /// Selected text given directly instead of through `selection`
        text: Option<String>,
    },
    RemoveConsoles {
        document: Option<DocumentRef>,
    },
    RemoveConsolesInWorkspace {
        workspace: Option<WorkspaceRef>,
    },
}

impl Command {
    pub fn id(&self) -> &'static str {
        match self {
            Self::SayHello { .. } => SAY_HELLO,
            Self::InsertConsole { .. } => INSERT_CONSOLE,
            Self::RemoveConsoles { .. } | Self::RemoveConsolesInWorkspace { .. } => REMOVE_CONSOLES,
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Greeted(String),
    /// `None` when there was no document to insert into
    Inserted(Option<InsertOutcome>),
    Removed(FileReport),
    RemovedInWorkspace(WorkspaceReport),
    /// The failure has already been reported through the notifier
    Failed,
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// Run a command, reporting any failure through the context's notifier
pub async fn execute(ctx: &CommandContext, command: Command) -> Outcome {
    let id = command.id();
    let result = match command {
        Command::SayHello { name } => Ok(Outcome::Greeted(hello::say_hello(name.as_deref()))),
        Command::InsertConsole {
            document,
            selection,
            text,
        } => insert::insert_console(ctx, document.as_ref(), selection, text.as_deref())
            .await
            .map(Outcome::Inserted),
        Command::RemoveConsoles { document } => remove::remove_consoles(ctx, document.as_ref())
            .await
            .map(Outcome::Removed),
        Command::RemoveConsolesInWorkspace { workspace } => {
            remove::remove_consoles_in_workspace(ctx, workspace.as_ref())
                .await
                .map(Outcome::RemovedInWorkspace)
        }
    };

    result.unwrap_or_else(|e| report_failure(ctx, id, &e))
}

/// Report a failure of command `id`, including one that happened while
/// preparing its arguments
pub fn report_failure(ctx: &CommandContext, id: &str, error: &anyhow::Error) -> Outcome {
    let detail = format!("{error:#}");
    tracing::error!(command = id, error = %detail, "Command failed");
    ctx.notifier.error(&failure_message(id, error));
    Outcome::Failed
}

/// User-facing text for a failed command
///
/// Missing-context errors carry their own wording; anything else is
/// prefixed with what the command was doing.
pub fn failure_message(id: &str, error: &anyhow::Error) -> String {
    if let Some(missing) = error.downcast_ref::<CommandError>() {
        return missing.to_string();
    }
    match id {
        INSERT_CONSOLE => format!("Error inserting sulog console: {error:#}"),
        REMOVE_CONSOLES => format!("Error removing sulog consoles: {error:#}"),
        _ => format!("Error running {id}: {error:#}"),
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn test_failure_messages() {
        let missing = anyhow::Error::new(CommandError::NoActiveEditor);
        assert_eq!(
            failure_message(REMOVE_CONSOLES, &missing),
            "No active editor. Open a file to remove sulog consoles."
        );

        let io = anyhow!("disk full").context("Failed to write app.js");
        assert_eq!(
            failure_message(REMOVE_CONSOLES, &io),
            "Error removing sulog consoles: Failed to write app.js: disk full"
        );
        assert_eq!(
            failure_message(INSERT_CONSOLE, &anyhow!("boom")),
            "Error inserting sulog console: boom"
        );
    }

    #[test]
    fn test_open_local_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("missing").join("app.js");

        let error = DocumentRef::open_local(&file).unwrap_err();
        assert!(failure_message(REMOVE_CONSOLES, &error)
            .starts_with(&format!("Error removing sulog consoles: Failed to open {}", file.display())));
        assert!(WorkspaceRef::open_local(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_report_failure_notifies() {
        let notifier = Arc::new(crate::notify::RecordingNotifier::default());
        let ctx = CommandContext {
            settings: Arc::new(sulog_core::MemorySettings::default()),
            notifier: notifier.clone(),
            dry_run: false,
        };

        let outcome = report_failure(&ctx, INSERT_CONSOLE, &anyhow!("Failed to open x/app.js"));
        assert!(outcome.is_failure());
        assert_eq!(
            notifier.errors(),
            vec!["Error inserting sulog console: Failed to open x/app.js".to_string()]
        );
    }

    #[test]
    fn test_command_ids() {
        assert_eq!(Command::SayHello { name: None }.id(), "sulog.sayHello");
        assert_eq!(
            Command::RemoveConsolesInWorkspace { workspace: None }.id(),
            "sulog.removeConsoles"
        );
    }
}
