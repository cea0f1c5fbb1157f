use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::VaultError;

/// Extension used for library files.
pub const LIBRARY_EXT: &str = ".md";

/// Prefix that marks a section heading once the line is trimmed.
pub const SECTION_MARKER: &str = "## ";

/// Title reported for lines that come before the first section heading.
pub const UNTITLED_SECTION: &str = "Untitled";

/// A named Markdown file holding study notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub name: String,
    pub path: PathBuf,
}

impl Library {
    pub fn new(name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            name: name.into(),
            path,
        }
    }

    /// File name of the library on disk (`name.md`).
    pub fn file_name(&self) -> String {
        format!("{}{}", self.name, LIBRARY_EXT)
    }
}

/// A `## ` heading found while scanning a library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeading {
    /// 1-based line number of the heading.
    pub line_number: usize,
    pub title: String,
}

/// A section title together with its content lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub lines: Vec<String>,
}

/// A single line that matched a keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub line_number: usize,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Before,
    After,
}

impl FromStr for Direction {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "before" => Ok(Direction::Before),
            "after" => Ok(Direction::After),
            other => Err(VaultError::InvalidFormat(format!(
                "invalid direction '{}', use 'before' or 'after'",
                other
            ))),
        }
    }
}

/// Where new content goes inside a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Directly under the heading.
    Start,
    /// After the last line of the section.
    End,
    /// Relative to a 1-based line of the section body.
    Line { offset: usize, direction: Direction },
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Start => write!(f, "start"),
            Position::End => write!(f, "end"),
            Position::Line { offset, direction } => {
                let dir = match direction {
                    Direction::Before => "before",
                    Direction::After => "after",
                };
                write!(f, "{} line {}", dir, offset)
            }
        }
    }
}

/// Returns the heading title if `line` is a section marker.
pub fn section_title(line: &str) -> Option<&str> {
    line.trim().strip_prefix(SECTION_MARKER).map(str::trim)
}
