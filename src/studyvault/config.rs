use crate::error::{Result, VaultError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const LIBRARY_SUBDIR: &str = "libraries";
const DEFAULT_EXPORT_DIR: &str = "exports";

/// Configuration for studyvault, stored in `<home>/config.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VaultConfig {
    /// Directory holding the `.md` libraries (defaults to `<home>/libraries`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_dir: Option<PathBuf>,

    /// Directory PDF exports are written to (defaults to `./exports`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl VaultConfig {
    pub const KEYS: [&'static str; 2] = ["library-dir", "export-dir"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(VaultError::Io)?;
        let config: VaultConfig =
            serde_json::from_str(&content).map_err(VaultError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(VaultError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(VaultError::Serialization)?;
        fs::write(config_path, content).map_err(VaultError::Io)?;
        Ok(())
    }

    pub fn library_dir(&self, home: &Path) -> PathBuf {
        self.library_dir
            .clone()
            .unwrap_or_else(|| home.join(LIBRARY_SUBDIR))
    }

    pub fn export_dir(&self, cwd: &Path) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_EXPORT_DIR))
    }

    pub fn get(&self, key: &str) -> Result<Option<PathBuf>> {
        match key {
            "library-dir" => Ok(self.library_dir.clone()),
            "export-dir" => Ok(self.export_dir.clone()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        let value = if value.is_empty() {
            None
        } else {
            Some(PathBuf::from(value))
        };
        match key {
            "library-dir" => self.library_dir = value,
            "export-dir" => self.export_dir = value,
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> VaultError {
    VaultError::InvalidFormat(format!(
        "unknown config key '{}' (known: {})",
        key,
        VaultConfig::KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_dirs() {
        let config = VaultConfig::default();
        let home = Path::new("/home/me/.vault");
        assert_eq!(config.library_dir(home), home.join("libraries"));
        assert_eq!(
            config.export_dir(Path::new("/work")),
            Path::new("/work/exports")
        );
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = VaultConfig::load(temp.path().join("nope")).unwrap();
        assert_eq!(config, VaultConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();

        let mut config = VaultConfig::default();
        config.set("library-dir", "/data/notes").unwrap();
        config.save(temp.path()).unwrap();

        let loaded = VaultConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.library_dir, Some(PathBuf::from("/data/notes")));
        assert_eq!(loaded.export_dir, None);
    }

    #[test]
    fn test_set_empty_clears_value() {
        let mut config = VaultConfig::default();
        config.set("export-dir", "out").unwrap();
        assert_eq!(config.get("export-dir").unwrap(), Some(PathBuf::from("out")));
        config.set("export-dir", "").unwrap();
        assert_eq!(config.get("export-dir").unwrap(), None);
    }

    #[test]
    fn test_unknown_key() {
        let mut config = VaultConfig::default();
        assert!(config.get("colour").is_err());
        assert!(config.set("colour", "red").is_err());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), "{ not json").unwrap();
        assert!(matches!(
            VaultConfig::load(temp.path()),
            Err(VaultError::Serialization(_))
        ));
    }
}
