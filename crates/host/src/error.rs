/// Missing-context failures: the command aborts before touching anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("No active editor. Open a file to remove sulog consoles.")]
    NoActiveEditor,
    #[error("No workspace folder is open. Open a folder to remove sulog consoles.")]
    NoWorkspaceFolder,
}
