//! Section-scoped insert.
//!
//! Inserting is split in two: [`plan`] works out where the new line goes and
//! renders a preview without touching the library, and [`commit`] writes the
//! staged result only when the caller confirms it. Declining leaves the file
//! exactly as it was.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::model::{Direction, Library, Position};
use crate::store::{LibraryBackend, LibraryStore};
use crate::text::LineBuffer;
use tracing::debug;

/// Lines of context shown past the end of the section.
const PREVIEW_TRAILING_LINES: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLine {
    pub text: String,
    /// True for the line being inserted.
    pub inserted: bool,
}

/// An insert that has been computed but not yet written.
#[derive(Debug, Clone)]
pub struct PendingInsert {
    pub library: Library,
    pub section: String,
    /// 0-based index the new line will occupy.
    pub insert_at: usize,
    pub preview: Vec<PreviewLine>,
    staged: LineBuffer,
}

impl PendingInsert {
    /// Full library text as it will be written on commit.
    pub fn staged_text(&self) -> String {
        self.staged.to_text()
    }
}

pub fn plan<B: LibraryBackend>(
    store: &LibraryStore<B>,
    library: &Library,
    section: &str,
    position: Position,
    content: &str,
) -> Result<PendingInsert> {
    let section = section.trim();
    if section.is_empty() {
        return Err(VaultError::EmptyInput("Section title"));
    }

    let buf = LineBuffer::parse(&store.read(library)?);
    let start = buf
        .find_section(section)
        .ok_or_else(|| VaultError::SectionNotFound(section.to_string()))?;
    let end = buf.section_end(start);
    let insert_at = insertion_index(start, end, position)?;

    let mut staged = buf.clone();
    staged.insert(insert_at, content);

    let preview_end = (end + PREVIEW_TRAILING_LINES).min(staged.len());
    let preview = staged.lines()[start..preview_end]
        .iter()
        .enumerate()
        .map(|(offset, line)| PreviewLine {
            text: line.trim_end().to_string(),
            inserted: start + offset == insert_at,
        })
        .collect();

    debug!(library = %library.name, section, %position, insert_at, "planned insert");

    Ok(PendingInsert {
        library: library.clone(),
        section: section.to_string(),
        insert_at,
        preview,
        staged,
    })
}

/// Write a planned insert if `confirmed`; otherwise drop it.
pub fn commit<B: LibraryBackend>(
    store: &LibraryStore<B>,
    pending: PendingInsert,
    confirmed: bool,
) -> Result<CmdResult> {
    if !confirmed {
        return Ok(CmdResult::default().with_message(CmdMessage::warning("Operation cancelled.")));
    }

    store.write(&pending.library, &pending.staged.to_text())?;
    debug!(library = %pending.library.name, section = %pending.section, "committed insert");
    Ok(CmdResult::default().with_message(CmdMessage::success("Content appended successfully.")))
}

/// `start` is the heading index, `end` the index of the next heading (or the
/// line count).
fn insertion_index(start: usize, end: usize, position: Position) -> Result<usize> {
    let body_len = end - start - 1;
    match position {
        Position::Start => Ok(start + 1),
        Position::End => Ok(end),
        Position::Line { offset, direction } => {
            if offset < 1 || offset > body_len {
                return Err(VaultError::InvalidOffset {
                    offset,
                    len: body_len,
                });
            }
            Ok(match direction {
                Direction::Before => start + offset,
                Direction::After => start + offset + 1,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemBackend;

    const NOTES: &str = "# Bio Library\n## Cells\none\ntwo\nthree\n## Genes\nDNA\n";

    fn setup(content: &str) -> (LibraryStore<MemBackend>, Library) {
        let store = LibraryStore::new(MemBackend::new().with_library("bio", content));
        let lib = store.open("bio").unwrap();
        (store, lib)
    }

    fn line(offset: usize, direction: Direction) -> Position {
        Position::Line { offset, direction }
    }

    fn insert(content: &str, position: Position) -> String {
        let (store, lib) = setup(content);
        let pending = plan(&store, &lib, "Cells", position, "NEW").unwrap();
        commit(&store, pending, true).unwrap();
        store.read(&lib).unwrap()
    }

    #[test]
    fn start_goes_under_heading() {
        assert_eq!(
            insert(NOTES, Position::Start),
            "# Bio Library\n## Cells\nNEW\none\ntwo\nthree\n## Genes\nDNA\n"
        );
    }

    #[test]
    fn end_goes_before_next_heading() {
        assert_eq!(
            insert(NOTES, Position::End),
            "# Bio Library\n## Cells\none\ntwo\nthree\nNEW\n## Genes\nDNA\n"
        );
    }

    #[test]
    fn end_of_last_section_is_end_of_file() {
        let (store, lib) = setup("## Only\nbody");
        let pending = plan(&store, &lib, "Only", Position::End, "tail").unwrap();
        commit(&store, pending, true).unwrap();
        assert_eq!(store.read(&lib).unwrap(), "## Only\nbody\ntail\n");
    }

    #[test]
    fn before_first_body_line_shifts_body_down() {
        assert_eq!(
            insert(NOTES, line(1, Direction::Before)),
            "# Bio Library\n## Cells\nNEW\none\ntwo\nthree\n## Genes\nDNA\n"
        );
    }

    #[test]
    fn after_relative_line() {
        assert_eq!(
            insert(NOTES, line(2, Direction::After)),
            "# Bio Library\n## Cells\none\ntwo\nNEW\nthree\n## Genes\nDNA\n"
        );
        assert_eq!(
            insert(NOTES, line(3, Direction::After)),
            "# Bio Library\n## Cells\none\ntwo\nthree\nNEW\n## Genes\nDNA\n"
        );
    }

    #[test]
    fn offset_outside_body_is_rejected() {
        let (store, lib) = setup(NOTES);
        for offset in [0, 4] {
            let err = plan(&store, &lib, "Cells", line(offset, Direction::Before), "x")
                .unwrap_err();
            assert!(matches!(err, VaultError::InvalidOffset { len: 3, .. }));
        }
    }

    #[test]
    fn unknown_section_is_rejected() {
        let (store, lib) = setup(NOTES);
        let err = plan(&store, &lib, "Proteins", Position::Start, "x").unwrap_err();
        assert!(matches!(err, VaultError::SectionNotFound(_)));
    }

    #[test]
    fn preview_marks_inserted_line() {
        let (store, lib) = setup(NOTES);
        let pending = plan(&store, &lib, "Cells", line(1, Direction::Before), "NEW").unwrap();
        assert_eq!(pending.insert_at, 2);

        let texts: Vec<_> = pending.preview.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["## Cells", "NEW", "one", "two", "three", "## Genes"]);
        let marked: Vec<_> = pending
            .preview
            .iter()
            .filter(|l| l.inserted)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(marked, vec!["NEW"]);
    }

    #[test]
    fn planning_does_not_write() {
        let (store, lib) = setup(NOTES);
        let pending = plan(&store, &lib, "Cells", Position::End, "NEW").unwrap();
        assert_eq!(store.read(&lib).unwrap(), NOTES);
        assert!(pending.staged_text().contains("NEW"));
    }

    #[test]
    fn declining_leaves_file_identical() {
        let (store, lib) = setup(NOTES);
        let before = store.read(&lib).unwrap();
        let pending = plan(&store, &lib, "Cells", line(1, Direction::Before), "NEW").unwrap();
        let result = commit(&store, pending, false).unwrap();
        assert_eq!(store.read(&lib).unwrap(), before);
        assert!(result.messages[0].content.contains("cancelled"));
    }

    #[test]
    fn multi_line_content_is_inserted_as_block() {
        let (store, lib) = setup(NOTES);
        let pending = plan(&store, &lib, "Genes", Position::Start, "a\nb").unwrap();
        commit(&store, pending, true).unwrap();
        assert_eq!(
            store.read(&lib).unwrap(),
            "# Bio Library\n## Cells\none\ntwo\nthree\n## Genes\na\nb\nDNA\n"
        );
    }
}
