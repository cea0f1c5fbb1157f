use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::model::Library;
use crate::store::{LibraryBackend, LibraryStore};
use tracing::debug;

/// Append a new `## title` section holding `body` to the end of the library.
///
/// Titles are not checked for duplicates.
pub fn run<B: LibraryBackend>(
    store: &LibraryStore<B>,
    library: &Library,
    title: &str,
    body: &str,
) -> Result<CmdResult> {
    let title = title.trim();
    if title.is_empty() {
        return Err(VaultError::EmptyInput("Section title"));
    }

    let mut content = store.read(library)?;
    content.push_str(&format!("\n\n## {}\n{}\n", title, body));
    store.write(library, &content)?;
    debug!(library = %library.name, title, "appended section");

    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Content appended to: {}",
        library.file_name()
    ))))
}
