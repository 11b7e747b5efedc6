use std::path::PathBuf;

/// Errors raised by the transformation layer and settings resolution
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("console prefix is empty; refusing to match every console.log call")]
    EmptyPrefix,
    #[error("invalid statement pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("invalid settings: {0}")]
    Settings(#[from] toml::de::Error),
    #[error("cannot read settings file {}: {source}", path.display())]
    ReadSettings {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings file {}: {source}", path.display())]
    ParseSettings {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
