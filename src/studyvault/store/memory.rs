use super::LibraryBackend;
use crate::error::{Result, VaultError};
use crate::model::LIBRARY_EXT;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since studyvault is single-threaded,
/// which lets the `LibraryBackend` trait take `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    files: RefCell<HashMap<String, String>>,
    root_created: Cell<bool>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a library with raw content.
    pub fn with_library(self, name: &str, content: &str) -> Self {
        self.root_created.set(true);
        self.files
            .borrow_mut()
            .insert(name.to_string(), content.to_string());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    pub fn root_created(&self) -> bool {
        self.root_created.get()
    }

    /// Raw content of a library, bypassing the trait.
    pub fn content(&self, name: &str) -> Option<String> {
        self.files.borrow().get(name).cloned()
    }
}

impl LibraryBackend for MemBackend {
    fn library_path(&self, name: &str) -> PathBuf {
        PathBuf::from(format!("memory://{}{}", name, LIBRARY_EXT))
    }

    fn ensure_root(&self) -> Result<bool> {
        Ok(!self.root_created.replace(true))
    }

    fn list_names(&self) -> Result<Vec<String>> {
        Ok(self.files.borrow().keys().cloned().collect())
    }

    fn exists(&self, name: &str) -> bool {
        self.files.borrow().contains_key(name)
    }

    fn read(&self, name: &str) -> Result<String> {
        self.files
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| VaultError::LibraryNotFound(self.library_path(name)))
    }

    fn write(&self, name: &str, content: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(VaultError::Store("Simulated write error".to_string()));
        }
        self.files
            .borrow_mut()
            .insert(name.to_string(), content.to_string());
        Ok(())
    }
}
