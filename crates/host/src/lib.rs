// sulog-host library
// Command handlers, settings files and the notification boundary behind the `sulog` binary

// Command dispatch and handlers
pub mod commands;

// Command-line interface
pub mod cli;

// Settings files and their defaults
pub mod config;
pub mod settings;
pub mod watcher;

// Errors surfaced to the user
pub mod error;
pub mod notify;

// Workspace folder detection
pub mod workspace;

pub use commands::{execute, Command, CommandContext, DocumentRef, Outcome, WorkspaceRef};
pub use error::CommandError;
pub use notify::{Notifier, RecordingNotifier, StderrNotifier};
pub use settings::FileSettings;
