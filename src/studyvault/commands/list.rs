use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::store::{LibraryBackend, LibraryStore};

pub fn run<B: LibraryBackend>(store: &LibraryStore<B>) -> Result<CmdResult> {
    let names = store.list()?;
    let mut result = CmdResult::default();
    if names.is_empty() {
        result.add_message(CmdMessage::warning(
            "No libraries found. Use 'create' to make one.",
        ));
    }
    Ok(result.with_libraries(names))
}

/// Open library number `choice` (1-based) from a previous listing.
pub fn load<B: LibraryBackend>(
    store: &LibraryStore<B>,
    names: &[String],
    choice: &str,
) -> Result<CmdResult> {
    let index: usize = choice
        .trim()
        .parse()
        .map_err(|_| VaultError::InvalidSelection(choice.trim().to_string()))?;
    let name = index
        .checked_sub(1)
        .and_then(|i| names.get(i))
        .ok_or_else(|| VaultError::InvalidSelection(index.to_string()))?;

    let library = store.open(name)?;
    let message = CmdMessage::success(format!("Loaded library: {}", library.file_name()));
    Ok(CmdResult::default()
        .with_library(library)
        .with_message(message))
}
