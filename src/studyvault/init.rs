use crate::api::{VaultApi, VaultPaths};
use crate::config::VaultConfig;
use crate::error::{Result, VaultError};
use crate::store::fs::FsBackend;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Overrides the vault home directory (config and default library location).
pub const HOME_ENV: &str = "STUDYVAULT_HOME";

pub struct VaultContext {
    pub api: VaultApi<FsBackend>,
}

/// `$STUDYVAULT_HOME` if set, otherwise the platform data directory.
pub fn vault_home() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "studyvault", "studyvault")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| VaultError::Store("Could not determine data directory".to_string()))
}

pub fn initialize(cwd: &Path, library_dir: Option<PathBuf>) -> Result<VaultContext> {
    let home = vault_home()?;
    initialize_at(&home, cwd, library_dir)
}

/// Build the context for an explicit home directory.
///
/// An unreadable config falls back to defaults with a warning.
pub fn initialize_at(home: &Path, cwd: &Path, library_dir: Option<PathBuf>) -> Result<VaultContext> {
    let config = VaultConfig::load(home).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable config");
        VaultConfig::default()
    });

    let library_dir = library_dir.unwrap_or_else(|| config.library_dir(home));
    let export_dir = config.export_dir(cwd);
    debug!(
        library_dir = %library_dir.display(),
        export_dir = %export_dir.display(),
        "initialized vault"
    );

    let paths = VaultPaths {
        config_dir: home.to_path_buf(),
        export_dir,
    };
    let api = VaultApi::new(FsBackend::new(library_dir), paths);

    Ok(VaultContext { api })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_live_under_home() {
        let home = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        let ctx = initialize_at(home.path(), cwd.path(), None).unwrap();

        assert_eq!(
            ctx.api.store().resolve("bio"),
            home.path().join("libraries").join("bio.md")
        );
        assert_eq!(ctx.api.paths().export_dir, cwd.path().join("exports"));
        assert_eq!(ctx.api.paths().config_dir, home.path());
    }

    #[test]
    fn config_and_override_are_respected() {
        let home = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        let mut config = VaultConfig::default();
        config.set("library-dir", "/configured").unwrap();
        config.set("export-dir", "/pdfs").unwrap();
        config.save(home.path()).unwrap();

        let ctx = initialize_at(home.path(), cwd.path(), None).unwrap();
        assert_eq!(
            ctx.api.store().resolve("a"),
            PathBuf::from("/configured/a.md")
        );
        assert_eq!(ctx.api.paths().export_dir, PathBuf::from("/pdfs"));

        let ctx = initialize_at(home.path(), cwd.path(), Some(PathBuf::from("/cli"))).unwrap();
        assert_eq!(ctx.api.store().resolve("a"), PathBuf::from("/cli/a.md"));
    }

    #[test]
    fn broken_config_falls_back_to_defaults() {
        let home = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        fs::write(home.path().join("config.json"), "nope").unwrap();
        let ctx = initialize_at(home.path(), cwd.path(), None).unwrap();
        assert_eq!(
            ctx.api.store().resolve("bio"),
            home.path().join("libraries").join("bio.md")
        );
        assert_eq!(ctx.api.paths().export_dir, cwd.path().join("exports"));
    }
}
