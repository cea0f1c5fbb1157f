use super::LibraryBackend;
use crate::error::{Result, VaultError};
use crate::model::LIBRARY_EXT;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process;

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl LibraryBackend for FsBackend {
    fn library_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}{}", name, LIBRARY_EXT))
    }

    fn ensure_root(&self) -> Result<bool> {
        if self.root.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(&self.root).map_err(VaultError::Io)?;
        Ok(true)
    }

    fn list_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(VaultError::Io)? {
            let entry = entry.map_err(VaultError::Io)?;
            if !entry.file_type().map_err(VaultError::Io)?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            if let Some(name) = file_name
                .to_str()
                .and_then(|n| n.strip_suffix(LIBRARY_EXT))
            {
                if !name.is_empty() {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }

    fn exists(&self, name: &str) -> bool {
        self.library_path(name).is_file()
    }

    fn read(&self, name: &str) -> Result<String> {
        let path = self.library_path(name);
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => VaultError::LibraryNotFound(path),
            _ => VaultError::Io(e),
        })
    }

    fn write(&self, name: &str, content: &str) -> Result<()> {
        self.ensure_root()?;
        let target = self.library_path(name);

        // Atomic write
        let tmp = self
            .root
            .join(format!(".{}{}.{}.tmp", name, LIBRARY_EXT, process::id()));
        fs::write(&tmp, content).map_err(VaultError::Io)?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(VaultError::Io(e));
        }
        Ok(())
    }
}
