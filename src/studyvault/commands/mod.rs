//! # Command Layer
//!
//! One module per operation. Each exposes plain functions taking a
//! [`LibraryStore`](crate::store::LibraryStore) and the open library, and
//! returning a [`CmdResult`]. Nothing here prints or prompts.

use crate::model::{Library, LineMatch, Section, SectionHeading};
use std::path::PathBuf;

pub mod append;
pub mod config;
pub mod create;
pub mod delete;
pub mod export;
pub mod index;
pub mod insert;
pub mod list;
pub mod search;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub library: Option<Library>,
    pub libraries: Vec<String>,
    pub sections: Vec<SectionHeading>,
    pub section: Option<Section>,
    pub line_matches: Vec<LineMatch>,
    pub section_matches: Vec<Section>,
    pub output_path: Option<PathBuf>,
    pub config_entries: Vec<(String, String)>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_library(mut self, library: Library) -> Self {
        self.library = Some(library);
        self
    }

    pub fn with_libraries(mut self, libraries: Vec<String>) -> Self {
        self.libraries = libraries;
        self
    }

    pub fn with_sections(mut self, sections: Vec<SectionHeading>) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.section = Some(section);
        self
    }

    pub fn with_line_matches(mut self, matches: Vec<LineMatch>) -> Self {
        self.line_matches = matches;
        self
    }

    pub fn with_section_matches(mut self, matches: Vec<Section>) -> Self {
        self.section_matches = matches;
        self
    }

    pub fn with_output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }

    pub fn with_config_entries(mut self, entries: Vec<(String, String)>) -> Self {
        self.config_entries = entries;
        self
    }
}
