//! Line-oriented view over a library's text.
//!
//! Lines keep their terminators, so `LineBuffer::parse(text).to_text()` gives
//! back the exact input. Mutations only touch the lines they target.

use crate::model::section_title;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at a 1-based position, terminator included.
    pub fn get(&self, line_number: usize) -> Option<&str> {
        let idx = line_number.checked_sub(1)?;
        self.lines.get(idx).map(String::as_str)
    }

    pub fn get_mut(&mut self, line_number: usize) -> Option<&mut String> {
        let idx = line_number.checked_sub(1)?;
        self.lines.get_mut(idx)
    }

    /// Iterates `(line_number, line)` pairs, 1-based.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.as_str()))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Inserts `content` as a new line before the 0-based index `at`.
    ///
    /// An unterminated line in front of the insertion point gets a newline so
    /// the two do not run together.
    pub fn insert(&mut self, at: usize, content: &str) {
        let at = at.min(self.lines.len());
        if at > 0 {
            let prev = &mut self.lines[at - 1];
            if !prev.ends_with('\n') {
                prev.push('\n');
            }
        }
        self.lines.insert(at, format!("{}\n", content));
    }

    /// 0-based index of the first line that trims to `## {title}`.
    pub fn find_section(&self, title: &str) -> Option<usize> {
        let header = format!("## {}", title);
        let header = header.trim();
        self.lines.iter().position(|line| line.trim() == header)
    }

    /// 0-based index of the next section marker after `start`, or the line count.
    pub fn section_end(&self, start: usize) -> usize {
        self.lines
            .iter()
            .enumerate()
            .skip(start + 1)
            .find(|(_, line)| section_title(line).is_some())
            .map(|(idx, _)| idx)
            .unwrap_or(self.lines.len())
    }

    pub fn to_text(&self) -> String {
        self.lines.concat()
    }
}
