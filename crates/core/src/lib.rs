//! sulog-core
//!
//! Pure text transformations behind the `sulog` commands: building styled
//! `console.log` statements from a selection and stripping them out again.
//! Nothing in this crate touches the filesystem.

pub mod builder;
pub mod config;
pub mod document;
pub mod error;
pub mod insert;
pub mod remover;
pub mod style;

pub use builder::{build_statement, variables};
pub use config::{Configuration, MemorySettings, RawSettings, SettingsStore};
pub use document::{Position, Selection};
pub use error::{Error, Result};
pub use insert::{plan_insertion, Insertion};
pub use remover::{remove_statements, Removal, StatementPatterns};
