use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{LibraryBackend, LibraryStore};

pub fn run<B: LibraryBackend>(store: &LibraryStore<B>, name: &str) -> Result<CmdResult> {
    let library = store.create(name.trim())?;
    let message = CmdMessage::success(format!("Loaded library: {}", library.file_name()));
    Ok(CmdResult::default()
        .with_library(library)
        .with_message(message))
}
