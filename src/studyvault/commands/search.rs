use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::model::{section_title, Library, LineMatch, Section, UNTITLED_SECTION};
use crate::store::{LibraryBackend, LibraryStore};
use crate::text::LineBuffer;

/// Lines containing `keyword`, case-insensitive.
pub fn lines<B: LibraryBackend>(
    store: &LibraryStore<B>,
    library: &Library,
    keyword: &str,
) -> Result<CmdResult> {
    let keyword = require_keyword(keyword)?;
    let buf = LineBuffer::parse(&store.read(library)?);
    let matches = match_lines(&buf, keyword);

    let mut result = CmdResult::default();
    if matches.is_empty() {
        result.add_message(CmdMessage::warning("No matches found."));
    }
    Ok(result.with_line_matches(matches))
}

/// Whole sections with at least one content line containing `keyword`.
pub fn sections<B: LibraryBackend>(
    store: &LibraryStore<B>,
    library: &Library,
    keyword: &str,
) -> Result<CmdResult> {
    let keyword = require_keyword(keyword)?;
    let buf = LineBuffer::parse(&store.read(library)?);
    let matches = match_sections(&buf, keyword);

    let mut result = CmdResult::default();
    if matches.is_empty() {
        result.add_message(CmdMessage::warning("No sections contain this keyword."));
    }
    Ok(result.with_section_matches(matches))
}

pub fn match_lines(buf: &LineBuffer, keyword: &str) -> Vec<LineMatch> {
    let needle = keyword.to_lowercase();
    buf.numbered()
        .filter(|(_, line)| line.to_lowercase().contains(&needle))
        .map(|(line_number, line)| LineMatch {
            line_number,
            content: line.trim().to_string(),
        })
        .collect()
}

/// Lines before the first heading form an "Untitled" section. The heading
/// itself never counts as a match.
pub fn match_sections(buf: &LineBuffer, keyword: &str) -> Vec<Section> {
    let needle = keyword.to_lowercase();
    let mut results = Vec::new();
    let mut current = Section {
        title: UNTITLED_SECTION.to_string(),
        lines: Vec::new(),
    };
    let mut matched = false;

    for (_, line) in buf.numbered() {
        if let Some(title) = section_title(line) {
            let next = Section {
                title: title.to_string(),
                lines: Vec::new(),
            };
            let finished = std::mem::replace(&mut current, next);
            if matched {
                results.push(finished);
            }
            matched = false;
        } else {
            let stripped = line.trim();
            if stripped.to_lowercase().contains(&needle) {
                matched = true;
            }
            current.lines.push(stripped.to_string());
        }
    }

    if matched {
        results.push(current);
    }
    results
}

/// Blank keywords are rejected; anything else is matched exactly as given,
/// surrounding spaces included.
fn require_keyword(keyword: &str) -> Result<&str> {
    if keyword.trim().is_empty() {
        return Err(VaultError::EmptyInput("Keyword"));
    }
    Ok(keyword)
}
