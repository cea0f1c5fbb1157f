use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::model::{Library, LineMatch};
use crate::store::{LibraryBackend, LibraryStore};
use crate::text::LineBuffer;
use std::collections::BTreeSet;
use tracing::debug;

/// Lines that contain `keyword` exactly (case-sensitive), as deletion candidates.
pub fn candidates<B: LibraryBackend>(
    store: &LibraryStore<B>,
    library: &Library,
    keyword: &str,
) -> Result<CmdResult> {
    require_keyword(keyword)?;
    let buf = LineBuffer::parse(&store.read(library)?);
    let matches: Vec<LineMatch> = buf
        .numbered()
        .filter(|(_, line)| line.contains(keyword))
        .map(|(line_number, line)| LineMatch {
            line_number,
            content: line.trim().to_string(),
        })
        .collect();

    let mut result = CmdResult::default();
    if matches.is_empty() {
        result.add_message(CmdMessage::warning("No matches found."));
    }
    Ok(result.with_line_matches(matches))
}

/// Remove the first occurrence of `keyword` from each selected line.
///
/// Line numbers are 1-based; numbers past the end of the file are skipped.
/// Fails with `NotFound` and writes nothing when no selected line holds the
/// keyword.
pub fn run<B: LibraryBackend>(
    store: &LibraryStore<B>,
    library: &Library,
    keyword: &str,
    line_numbers: &BTreeSet<usize>,
) -> Result<CmdResult> {
    require_keyword(keyword)?;
    let mut buf = LineBuffer::parse(&store.read(library)?);

    let mut modified = Vec::new();
    for &line_number in line_numbers {
        if let Some(line) = buf.get_mut(line_number) {
            if line.contains(keyword) {
                *line = line.replacen(keyword, "", 1);
                modified.push(line_number);
            }
        }
    }

    if modified.is_empty() {
        return Err(VaultError::NotFound(
            "Keyword was not found in the selected lines.".to_string(),
        ));
    }

    store.write(library, &buf.to_text())?;
    debug!(library = %library.name, lines = ?modified, "deleted keyword");

    Ok(CmdResult::default().with_message(CmdMessage::success(
        "Keyword deleted from selected lines.",
    )))
}

/// Parse a comma-separated list of line numbers such as `"2, 4"`.
pub fn parse_selection(input: &str) -> Result<BTreeSet<usize>> {
    let selection: BTreeSet<usize> = input
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| VaultError::InvalidSelection(format!("'{}'", part.trim())))
        })
        .collect::<Result<_>>()?;
    Ok(selection)
}

fn require_keyword(keyword: &str) -> Result<()> {
    if keyword.is_empty() {
        return Err(VaultError::EmptyInput("Keyword"));
    }
    Ok(())
}
