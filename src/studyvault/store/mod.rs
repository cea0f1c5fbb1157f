//! # Storage Layer
//!
//! Libraries are plain Markdown files in one flat directory. Raw I/O goes
//! through the [`LibraryBackend`] trait so the command layer never touches
//! `std::fs` directly.
//!
//! ## Implementations
//!
//! - [`fs::FsBackend`]: production storage, `<root>/<name>.md`
//!   - Writes go to a temporary file that is renamed over the target
//! - [`memory::MemBackend`]: in-memory storage for testing
//!
//! [`LibraryStore`] sits on top of a backend and implements the library
//! lifecycle: resolving names, creating, listing and opening libraries.
//!
//! Every read returns the whole file and every write replaces it. A backend
//! that streams lines can replace either implementation without touching the
//! commands.

use crate::error::{Result, VaultError};
use crate::model::{Library, LIBRARY_EXT};
use std::path::PathBuf;
use tracing::debug;

pub mod fs;
pub mod memory;

/// Abstract interface for raw library I/O.
pub trait LibraryBackend {
    /// Path a library with this name lives at. No existence check.
    fn library_path(&self, name: &str) -> PathBuf;

    /// Create the library directory if needed. Returns true if it was created.
    fn ensure_root(&self) -> Result<bool>;

    /// Names (without extension) of every library in the directory.
    fn list_names(&self) -> Result<Vec<String>>;

    fn exists(&self, name: &str) -> bool;

    /// Read the whole library. Returns `LibraryNotFound` if it is missing.
    fn read(&self, name: &str) -> Result<String>;

    /// Replace the whole library with `content`.
    fn write(&self, name: &str, content: &str) -> Result<()>;
}

pub struct LibraryStore<B: LibraryBackend> {
    backend: B,
}

impl<B: LibraryBackend> LibraryStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn resolve(&self, name: &str) -> PathBuf {
        self.backend.library_path(name)
    }

    /// Create a library holding only its top-level heading.
    pub fn create(&self, name: &str) -> Result<Library> {
        validate_name(name)?;
        self.backend.ensure_root()?;
        if self.backend.exists(name) {
            return Err(VaultError::AlreadyExists(name.to_string()));
        }
        self.backend.write(name, &format!("# {} Library\n", name))?;
        debug!(library = name, "created library");
        Ok(Library::new(name, self.resolve(name)))
    }

    /// All library names, sorted. Creates the directory if it is missing.
    pub fn list(&self) -> Result<Vec<String>> {
        if self.backend.ensure_root()? {
            debug!("created library directory");
        }
        let mut names = self.backend.list_names()?;
        names.sort();
        Ok(names)
    }

    /// Open an existing library. Accepts names with or without `.md`.
    pub fn open(&self, name: &str) -> Result<Library> {
        let name = name.trim();
        let name = name.strip_suffix(LIBRARY_EXT).unwrap_or(name);
        validate_name(name)?;
        if !self.backend.exists(name) {
            return Err(VaultError::LibraryNotFound(self.resolve(name)));
        }
        Ok(Library::new(name, self.resolve(name)))
    }

    pub fn read(&self, library: &Library) -> Result<String> {
        self.backend.read(&library.name)
    }

    pub fn write(&self, library: &Library, content: &str) -> Result<()> {
        debug!(library = %library.name, bytes = content.len(), "writing library");
        self.backend.write(&library.name, content)
    }
}

fn validate_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name != name.trim()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\']);
    if invalid {
        return Err(VaultError::InvalidName(name.to_string()));
    }
    Ok(())
}
