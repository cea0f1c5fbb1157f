use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("A library named '{0}' already exists")]
    AlreadyExists(String),

    #[error("Library not found: {}", .0.display())]
    LibraryNotFound(PathBuf),

    #[error("{0}")]
    NotFound(String),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Invalid line number inside section: {offset} (section has {len} line(s))")]
    InvalidOffset { offset: usize, len: usize },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid library name: '{0}'")]
    InvalidName(String),

    #[error("{0} must not be empty")]
    EmptyInput(&'static str),

    #[error("No library loaded. Use 'create' or 'list' first.")]
    NoLibraryLoaded,

    #[error("PDF export failed: {0}")]
    ExportFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, VaultError>;
