use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::model::Library;
use crate::store::{LibraryBackend, LibraryStore};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Replace the first occurrence of `old` anywhere in the library with `new`.
pub fn run<B: LibraryBackend>(
    store: &LibraryStore<B>,
    library: &Library,
    old: &str,
    new: &str,
) -> Result<CmdResult> {
    if old.is_empty() {
        return Err(VaultError::InvalidFormat(
            "text to replace must not be empty".to_string(),
        ));
    }

    let content = store.read(library)?;
    if !content.contains(old) {
        return Err(VaultError::NotFound(
            "The specified text to update was not found.".to_string(),
        ));
    }

    let updated = content.replacen(old, new, 1);
    store.write(library, &updated)?;
    debug!(library = %library.name, "replaced first occurrence");

    Ok(CmdResult::default().with_message(CmdMessage::success("Content successfully updated.")))
}

/// Parse `Update: "old text" with: "new text"` into `(old, new)`.
///
/// The keywords are case-insensitive; both quoted parts must be non-empty.
pub fn parse_command(command: &str) -> Result<(String, String)> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)^Update:\s*"(.+?)"\s*with:\s*"(.+?)"$"#)
            .unwrap_or_else(|e| panic!("invalid update pattern: {e}"))
    });

    let caps = pattern.captures(command.trim()).ok_or_else(|| {
        VaultError::InvalidFormat(r#"use: Update: "old text" with: "new text""#.to_string())
    })?;
    Ok((caps[1].to_string(), caps[2].to_string()))
}
