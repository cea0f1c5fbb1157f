//! Section index: headings of a library and the content under each one.

use crate::commands::CmdResult;
use crate::error::{Result, VaultError};
use crate::model::{section_title, Library, Section, SectionHeading};
use crate::store::{LibraryBackend, LibraryStore};
use crate::text::LineBuffer;

pub fn list_sections<B: LibraryBackend>(
    store: &LibraryStore<B>,
    library: &Library,
) -> Result<CmdResult> {
    let buf = LineBuffer::parse(&store.read(library)?);
    Ok(CmdResult::default().with_sections(scan(&buf)))
}

pub fn extract<B: LibraryBackend>(
    store: &LibraryStore<B>,
    library: &Library,
    start_line: usize,
) -> Result<CmdResult> {
    let buf = LineBuffer::parse(&store.read(library)?);
    Ok(CmdResult::default().with_section(section_at(&buf, start_line)?))
}

/// Resolve a 1-based choice from a previous listing to its section.
pub fn extract_nth<B: LibraryBackend>(
    store: &LibraryStore<B>,
    library: &Library,
    sections: &[SectionHeading],
    choice: usize,
) -> Result<CmdResult> {
    let heading = choice
        .checked_sub(1)
        .and_then(|i| sections.get(i))
        .ok_or_else(|| VaultError::InvalidSelection(format!("section number {}", choice)))?;
    extract(store, library, heading.line_number)
}

/// Every heading in file order.
pub fn scan(buf: &LineBuffer) -> Vec<SectionHeading> {
    buf.numbered()
        .filter_map(|(line_number, line)| {
            section_title(line).map(|title| SectionHeading {
                line_number,
                title: title.to_string(),
            })
        })
        .collect()
}

/// The section whose heading sits on `start_line`, content right-trimmed.
pub fn section_at(buf: &LineBuffer, start_line: usize) -> Result<Section> {
    let header = buf
        .get(start_line)
        .ok_or_else(|| VaultError::InvalidSelection(format!("line {}", start_line)))?;
    let title = section_title(header)
        .ok_or_else(|| VaultError::SectionNotFound(format!("no heading on line {}", start_line)))?
        .to_string();

    let lines = buf
        .lines()
        .iter()
        .skip(start_line)
        .take_while(|line| section_title(line).is_none())
        .map(|line| line.trim_end().to_string())
        .collect();

    Ok(Section { title, lines })
}
