//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every studyvault operation, whatever the UI.
//!
//! The facade:
//! - **Checks the session** (library-scoped calls fail with `NoLibraryLoaded`)
//! - **Normalizes inputs** (numeric selections, update command syntax)
//! - **Dispatches** to the matching `commands::*` function
//!
//! It does no printing, prompting or formatting.
//!
//! `VaultApi<B: LibraryBackend>` is generic over storage: production uses
//! `FsBackend`, tests use `MemBackend`.

use crate::commands;
use crate::error::{Result, VaultError};
use crate::export::pdf::PdfSurface;
use crate::export::DrawingSurface;
use crate::model::{Position, SectionHeading};
use crate::session::Session;
use crate::store::{LibraryBackend, LibraryStore};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct VaultPaths {
    /// Where `config.json` lives.
    pub config_dir: PathBuf,
    /// Where PDF exports are written.
    pub export_dir: PathBuf,
}

pub struct VaultApi<B: LibraryBackend> {
    store: LibraryStore<B>,
    paths: VaultPaths,
}

impl<B: LibraryBackend> VaultApi<B> {
    pub fn new(backend: B, paths: VaultPaths) -> Self {
        Self {
            store: LibraryStore::new(backend),
            paths,
        }
    }

    pub fn store(&self) -> &LibraryStore<B> {
        &self.store
    }

    pub fn paths(&self) -> &VaultPaths {
        &self.paths
    }

    pub fn create_library(&self, session: &mut Session, name: &str) -> Result<CmdResult> {
        let result = commands::create::run(&self.store, name)?;
        if let Some(library) = &result.library {
            session.load(library.clone());
        }
        Ok(result)
    }

    pub fn list_libraries(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    /// Load library number `choice` from a listing made with `list_libraries`.
    pub fn load_library(
        &self,
        session: &mut Session,
        names: &[String],
        choice: &str,
    ) -> Result<CmdResult> {
        let result = commands::list::load(&self.store, names, choice)?;
        if let Some(library) = &result.library {
            session.load(library.clone());
        }
        Ok(result)
    }

    pub fn open_library(&self, session: &mut Session, name: &str) -> Result<CmdResult> {
        let library = self.store.open(name)?;
        session.load(library.clone());
        Ok(CmdResult::default().with_library(library))
    }

    pub fn list_sections(&self, session: &Session) -> Result<CmdResult> {
        commands::index::list_sections(&self.store, session.require()?)
    }

    pub fn view_section(&self, session: &Session, start_line: usize) -> Result<CmdResult> {
        commands::index::extract(&self.store, session.require()?, start_line)
    }

    /// View section number `choice` (1-based) from a `list_sections` result.
    pub fn view_nth_section(
        &self,
        session: &Session,
        sections: &[SectionHeading],
        choice: &str,
    ) -> Result<CmdResult> {
        let number = parse_number(choice)?;
        commands::index::extract_nth(&self.store, session.require()?, sections, number)
    }

    pub fn append_section(&self, session: &Session, title: &str, body: &str) -> Result<CmdResult> {
        commands::append::run(&self.store, session.require()?, title, body)
    }

    pub fn update_text(&self, session: &Session, old: &str, new: &str) -> Result<CmdResult> {
        commands::update::run(&self.store, session.require()?, old, new)
    }

    /// Apply an `Update: "old" with: "new"` command.
    pub fn update_command(&self, session: &Session, command: &str) -> Result<CmdResult> {
        let library = session.require()?;
        let (old, new) = commands::update::parse_command(command)?;
        commands::update::run(&self.store, library, &old, &new)
    }

    pub fn delete_candidates(&self, session: &Session, keyword: &str) -> Result<CmdResult> {
        commands::delete::candidates(&self.store, session.require()?, keyword)
    }

    /// Delete `keyword` from the lines listed in `selection` (e.g. `"2, 4"`).
    pub fn delete_keyword(
        &self,
        session: &Session,
        keyword: &str,
        selection: &str,
    ) -> Result<CmdResult> {
        let library = session.require()?;
        let lines = commands::delete::parse_selection(selection)?;
        commands::delete::run(&self.store, library, keyword, &lines)
    }

    pub fn plan_insert(
        &self,
        session: &Session,
        section: &str,
        position: Position,
        content: &str,
    ) -> Result<PendingInsert> {
        commands::insert::plan(&self.store, session.require()?, section, position, content)
    }

    pub fn commit_insert(&self, pending: PendingInsert, confirmed: bool) -> Result<CmdResult> {
        commands::insert::commit(&self.store, pending, confirmed)
    }

    pub fn search_lines(&self, session: &Session, keyword: &str) -> Result<CmdResult> {
        commands::search::lines(&self.store, session.require()?, keyword)
    }

    pub fn search_sections(&self, session: &Session, keyword: &str) -> Result<CmdResult> {
        commands::search::sections(&self.store, session.require()?, keyword)
    }

    /// Export the open library to `<export dir>/<file>` as PDF.
    pub fn export_pdf(&self, session: &Session, file: Option<&str>) -> Result<CmdResult> {
        let library = session.require()?;
        let surface = PdfSurface::new(&format!("{} Library", library.name))?;
        self.export_with(session, surface, file)
    }

    pub fn export_with<S: DrawingSurface>(
        &self,
        session: &Session,
        surface: S,
        file: Option<&str>,
    ) -> Result<CmdResult> {
        let library = session.require()?;
        let output = commands::export::output_path(&self.paths.export_dir, library, file)?;
        commands::export::run(&self.store, library, surface, &output)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths.config_dir, action)
    }
}

fn parse_number(input: &str) -> Result<usize> {
    input
        .trim()
        .parse()
        .map_err(|_| VaultError::InvalidSelection(input.trim().to_string()))
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::insert::{PendingInsert, PreviewLine};
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
