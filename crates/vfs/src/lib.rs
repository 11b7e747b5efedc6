//! sulog-vfs
//!
//! Filesystem boundary for the sulog commands. Commands only talk to a
//! [`WorkspaceFs`]; the CLI plugs in [`LocalFs`], tests use [`MemoryFs`].

pub mod backend;
pub mod local;
pub mod memory;
pub mod walk;

pub use backend::{FileStat, WorkspaceFs};
pub use local::LocalFs;
pub use memory::MemoryFs;
pub use walk::{find_script_files, is_script_file, SCRIPT_EXTENSIONS, SKIPPED_DIRS};
