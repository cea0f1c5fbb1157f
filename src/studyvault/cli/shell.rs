//! Interactive menus.
//!
//! The main menu creates or loads a library and then hands over to the
//! library menu, which runs until `exit` returns to the main menu. Errors are
//! printed and the loop carries on; closing stdin ends the shell.

use super::print::{
    print_error, print_messages, render_libraries, render_line_matches, render_preview,
    render_section, render_section_matches, render_sections,
};
use super::prompt::{self, is_eof};
use colored::Colorize;
use studyvault::api::VaultApi;
use studyvault::error::{Result, VaultError};
use studyvault::model::{Direction, Position};
use studyvault::session::Session;
use studyvault::store::LibraryBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainChoice {
    Create,
    List,
    Exit,
}

impl MainChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "create" => Some(MainChoice::Create),
            "list" => Some(MainChoice::List),
            "exit" => Some(MainChoice::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LibraryChoice {
    Index,
    Store,
    Update,
    Delete,
    Append,
    Search,
    Export,
    Exit,
}

impl LibraryChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "index" => Some(LibraryChoice::Index),
            "store" => Some(LibraryChoice::Store),
            "update" => Some(LibraryChoice::Update),
            "delete" => Some(LibraryChoice::Delete),
            "append" => Some(LibraryChoice::Append),
            "search" => Some(LibraryChoice::Search),
            "export" => Some(LibraryChoice::Export),
            "exit" => Some(LibraryChoice::Exit),
            _ => None,
        }
    }
}

pub(super) fn run<B: LibraryBackend>(api: &VaultApi<B>, session: &mut Session) -> Result<()> {
    match main_loop(api, session) {
        Err(e) if is_eof(&e) => {
            println!();
            Ok(())
        }
        other => other,
    }
}

fn main_loop<B: LibraryBackend>(api: &VaultApi<B>, session: &mut Session) -> Result<()> {
    loop {
        print_main_menu();
        let choice = prompt::input(">")?;

        let outcome = match MainChoice::parse(&choice) {
            Some(MainChoice::Create) => create(api, session),
            Some(MainChoice::List) => list_and_load(api, session),
            Some(MainChoice::Exit) => {
                println!("{}", "Goodbye!".magenta().bold());
                return Ok(());
            }
            None => {
                print_error(&"Unknown command. Please choose: create, list, or exit.");
                continue;
            }
        };

        match outcome {
            Ok(true) => library_loop(api, session)?,
            Ok(false) => {}
            Err(e) if is_eof(&e) => return Err(e),
            Err(e) => print_error(&e),
        }
    }
}

fn library_loop<B: LibraryBackend>(api: &VaultApi<B>, session: &Session) -> Result<()> {
    loop {
        print_library_menu(session);
        let choice = prompt::input(">")?;

        let outcome = match LibraryChoice::parse(&choice) {
            Some(LibraryChoice::Index) => index(api, session),
            Some(LibraryChoice::Store) => store(api, session),
            Some(LibraryChoice::Update) => update(api, session),
            Some(LibraryChoice::Delete) => delete(api, session),
            Some(LibraryChoice::Append) => append(api, session),
            Some(LibraryChoice::Search) => search(api, session),
            Some(LibraryChoice::Export) => export(api, session),
            Some(LibraryChoice::Exit) => return Ok(()),
            None => {
                print_error(&"Unknown command. Please choose a valid option.");
                continue;
            }
        };

        match outcome {
            Ok(()) => {}
            Err(e) if is_eof(&e) => return Err(e),
            Err(e) => print_error(&e),
        }
    }
}

fn print_main_menu() {
    println!("\n{}", "StudyVault Main Menu".cyan().bold());
    println!("{}  - Create a new data library", "create".green().bold());
    println!("{}    - List and load existing libraries", "list".blue().bold());
    println!("{}    - Exit the application", "exit".red().bold());
}

fn print_library_menu(session: &Session) {
    let name = session
        .current()
        .map(|l| l.file_name())
        .unwrap_or_default();
    println!("\n{}", format!("Library Loaded: {}", name).blue().bold());
    println!("{}   - Show all sections", "index".blue().bold());
    println!("{}   - Add content to the library", "store".green().bold());
    println!("{}  - Modify existing content", "update".yellow().bold());
    println!("{}  - Remove content", "delete".red().bold());
    println!("{}  - Add content to a specific section", "append".cyan().bold());
    println!("{}  - Find content", "search".magenta().bold());
    println!("{}  - Export current library to PDF", "export".white().bold());
    println!("{}    - Back to the main menu", "exit".red().bold());
}

/// Returns true when a library was loaded.
fn create<B: LibraryBackend>(api: &VaultApi<B>, session: &mut Session) -> Result<bool> {
    let name = prompt::input("Enter a name for the new library (without .md)")?;
    let result = api.create_library(session, &name)?;
    print_messages(&result.messages);
    Ok(true)
}

fn list_and_load<B: LibraryBackend>(api: &VaultApi<B>, session: &mut Session) -> Result<bool> {
    let result = api.list_libraries()?;
    print_messages(&result.messages);
    if result.libraries.is_empty() {
        return Ok(false);
    }
    print!("{}", render_libraries(&result.libraries));

    let choice = prompt::input("Enter the number of the library to load")?;
    let loaded = api.load_library(session, &result.libraries, &choice)?;
    print_messages(&loaded.messages);
    Ok(true)
}

fn index<B: LibraryBackend>(api: &VaultApi<B>, session: &Session) -> Result<()> {
    let result = api.list_sections(session)?;
    print!("{}", render_sections(&result.sections));
    if result.sections.is_empty() {
        return Ok(());
    }

    let choice = prompt::input("Section number to view (Enter to return)")?;
    if choice.is_empty() {
        return Ok(());
    }
    let view = api.view_nth_section(session, &result.sections, &choice)?;
    if let Some(section) = &view.section {
        print!("{}", render_section(section));
    }
    Ok(())
}

fn store<B: LibraryBackend>(api: &VaultApi<B>, session: &Session) -> Result<()> {
    let title = prompt::input("Enter a title for this entry")?;
    let body = prompt::multiline("Enter content")?;
    let result = api.append_section(session, &title, &body)?;
    print_messages(&result.messages);
    Ok(())
}

fn update<B: LibraryBackend>(api: &VaultApi<B>, session: &Session) -> Result<()> {
    println!("{}", "Enter update command in format:".cyan().bold());
    println!("{}", "Update: \"old text\" with: \"new text\"".dimmed());
    let command = prompt::input(">")?;
    let result = api.update_command(session, &command)?;
    print_messages(&result.messages);
    Ok(())
}

fn delete<B: LibraryBackend>(api: &VaultApi<B>, session: &Session) -> Result<()> {
    let keyword = prompt::input("Enter the keyword or phrase to delete")?;
    let candidates = api.delete_candidates(session, &keyword)?;
    print_messages(&candidates.messages);
    if candidates.line_matches.is_empty() {
        return Ok(());
    }
    print!(
        "{}",
        render_line_matches(&candidates.line_matches, "Lines containing the keyword:")
    );

    let selection = prompt::input("Enter line number(s) to delete from (comma-separated)")?;
    let result = api.delete_keyword(session, &keyword, &selection)?;
    print_messages(&result.messages);
    Ok(())
}

fn append<B: LibraryBackend>(api: &VaultApi<B>, session: &Session) -> Result<()> {
    let section = prompt::input("Enter section title (without ##)")?;
    let kind = prompt::input("Position (start / end / line)")?;
    let position = match kind.to_lowercase().as_str() {
        "start" => Position::Start,
        "end" => Position::End,
        "line" => {
            let offset = prompt::input("Enter line number (relative to section)")?
                .parse::<usize>()
                .map_err(|_| VaultError::InvalidFormat("Line number must be numeric.".into()))?;
            let direction = prompt::input("Insert before or after that line [before]")?;
            let direction = if direction.is_empty() {
                Direction::Before
            } else {
                direction.parse()?
            };
            Position::Line { offset, direction }
        }
        other => {
            return Err(VaultError::InvalidFormat(format!(
                "unknown position '{}', use start, end or line",
                other
            )))
        }
    };

    let content = prompt::multiline("Enter the content to insert")?;
    let pending = api.plan_insert(session, &section, position, &content)?;
    print!("{}", render_preview(&pending));
    let confirmed = prompt::confirm("Apply this change?")?;
    let result = api.commit_insert(pending, confirmed)?;
    print_messages(&result.messages);
    Ok(())
}

fn search<B: LibraryBackend>(api: &VaultApi<B>, session: &Session) -> Result<()> {
    let keyword = prompt::input("Enter a keyword or phrase to search for")?;
    let result = api.search_sections(session, &keyword)?;
    print!("{}", render_section_matches(&result.section_matches, &keyword));
    print_messages(&result.messages);
    Ok(())
}

fn export<B: LibraryBackend>(api: &VaultApi<B>, session: &Session) -> Result<()> {
    let default = session
        .require()
        .map(|l| format!("{}.pdf", l.name))?;
    let file = prompt::input(&format!("Enter output filename [default: {}]", default))?;
    let file = (!file.is_empty()).then_some(file.as_str());
    let result = api.export_pdf(session, file)?;
    print_messages(&result.messages);
    Ok(())
}
