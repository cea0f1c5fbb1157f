use crate::commands::{CmdMessage, CmdResult};
use crate::config::VaultConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = VaultConfig::load(config_dir)?;

    match action {
        ConfigAction::ShowAll => {
            let entries = VaultConfig::KEYS
                .iter()
                .map(|key| Ok((key.to_string(), display_value(config.get(key)?))))
                .collect::<Result<Vec<_>>>()?;
            Ok(CmdResult::default().with_config_entries(entries))
        }
        ConfigAction::ShowKey(key) => {
            let value = display_value(config.get(&key)?);
            Ok(CmdResult::default().with_config_entries(vec![(key, value)]))
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(config_dir)?;
            Ok(CmdResult::default()
                .with_message(CmdMessage::success(format!("{} set to '{}'", key, value))))
        }
    }
}

fn display_value(value: Option<std::path::PathBuf>) -> String {
    value
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(default)".to_string())
}
