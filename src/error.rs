//! Error types for jsbundle operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while bundling an HTML file.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{path} is not under source root {root}")]
    OutsideSourceRoot { path: PathBuf, root: PathBuf },

    #[error("Cannot resolve path: {0}")]
    InvalidPath(PathBuf),

    #[error("HTML parse error: {0}")]
    Parse(String),

    #[error("No <head> element found")]
    MissingHead,

    #[error("Cannot bundle remote script: {0}")]
    RemoteScript(String),

    #[error("Failed to read script {path}: {source}")]
    ReadScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
