use crate::error::{Result, VaultError};
use crate::model::Library;

/// The library the user is currently working in, if any.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Option<Library>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_library(library: Library) -> Self {
        Self {
            current: Some(library),
        }
    }

    pub fn load(&mut self, library: Library) {
        self.current = Some(library);
    }

    pub fn current(&self) -> Option<&Library> {
        self.current.as_ref()
    }

    /// The open library, or `NoLibraryLoaded`.
    pub fn require(&self) -> Result<&Library> {
        self.current.as_ref().ok_or(VaultError::NoLibraryLoaded)
    }
}
