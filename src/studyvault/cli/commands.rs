//! # CLI Layer
//!
//! This module is **one possible UI client** for studyvault, not the
//! application itself. It is the only place that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! One-shot commands open the named library into a fresh [`Session`], call the
//! API and print the result. `shell` (the default) runs the interactive menus.
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API and session
//! - `handle_*()`: Per-command handlers that call API and format output

use super::print::{
    print_messages, render_config, render_libraries, render_line_matches, render_preview,
    render_section, render_section_matches, render_sections,
};
use super::prompt;
use super::setup::{
    print_grouped_help, print_subcommand_help, Cli, Commands, ContentCommands, DataCommands,
    InsertAt, LibraryCommands, MiscCommands,
};
use super::shell;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use studyvault::api::{CmdMessage, ConfigAction, VaultApi};
use studyvault::error::{Result, VaultError};
use studyvault::init::initialize;
use studyvault::model::{Direction, Position};
use studyvault::session::Session;
use studyvault::store::fs::FsBackend;
use tracing_subscriber::EnvFilter;

/// Log filter, e.g. `STUDYVAULT_LOG=studyvault=debug`.
const LOG_ENV: &str = "STUDYVAULT_LOG";

struct AppContext {
    api: VaultApi<FsBackend>,
    session: Session,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.help {
        if cli.command.is_none() {
            print_grouped_help();
        } else {
            print_subcommand_help(&cli.command);
        }
        return Ok(());
    }

    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Library(cmd)) => match cmd {
            LibraryCommands::Create { name } => handle_create(&mut ctx, &name),
            LibraryCommands::List => handle_list(&ctx),
            LibraryCommands::Shell => shell::run(&ctx.api, &mut ctx.session),
        },
        Some(Commands::Content(cmd)) => match cmd {
            ContentCommands::Index { library, show } => {
                handle_index(&mut ctx, &library, show.as_deref())
            }
            ContentCommands::Store {
                library,
                title,
                body,
            } => handle_store(&mut ctx, &library, &title, body),
            ContentCommands::Update {
                library,
                old,
                new,
                command,
            } => handle_update(&mut ctx, &library, old, new, command),
            ContentCommands::Delete {
                library,
                keyword,
                lines,
            } => handle_delete(&mut ctx, &library, &keyword, lines.as_deref()),
            ContentCommands::Insert {
                library,
                section,
                at,
                line,
                after,
                yes,
                text,
            } => {
                let position = insert_position(at, line, after)?;
                handle_insert(&mut ctx, &library, &section, position, &text, yes)
            }
        },
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::Search {
                library,
                keyword,
                lines,
            } => handle_search(&mut ctx, &library, &keyword, lines),
            DataCommands::Export { library, output } => {
                handle_export(&mut ctx, &library, output.as_deref())
            }
        },
        Some(Commands::Misc(MiscCommands::Config { key, value })) => {
            handle_config(&ctx, key, value)
        }
        None => shell::run(&ctx.api, &mut ctx.session),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("studyvault=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let ctx = initialize(&cwd, cli.library_dir.clone())?;

    Ok(AppContext {
        api: ctx.api,
        session: Session::new(),
    })
}

fn open(ctx: &mut AppContext, library: &str) -> Result<()> {
    ctx.api.open_library(&mut ctx.session, library)?;
    Ok(())
}

fn handle_create(ctx: &mut AppContext, name: &str) -> Result<()> {
    let result = ctx.api.create_library(&mut ctx.session, name)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_libraries()?;
    print!("{}", render_libraries(&result.libraries));
    print_messages(&result.messages);
    Ok(())
}

fn handle_index(ctx: &mut AppContext, library: &str, show: Option<&str>) -> Result<()> {
    open(ctx, library)?;
    let result = ctx.api.list_sections(&ctx.session)?;

    match show {
        Some(choice) => {
            let view = ctx
                .api
                .view_nth_section(&ctx.session, &result.sections, choice)?;
            if let Some(section) = &view.section {
                print!("{}", render_section(section));
            }
        }
        None => print!("{}", render_sections(&result.sections)),
    }
    Ok(())
}

fn handle_store(ctx: &mut AppContext, library: &str, title: &str, body: Vec<String>) -> Result<()> {
    open(ctx, library)?;

    let body = if !body.is_empty() {
        body.join(" ")
    } else if !prompt::is_interactive() {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer.trim_end_matches(['\n', '\r']).to_string()
    } else {
        prompt::multiline("Enter content")?
    };

    let result = ctx.api.append_section(&ctx.session, title, &body)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(
    ctx: &mut AppContext,
    library: &str,
    old: Option<String>,
    new: Option<String>,
    command: Option<String>,
) -> Result<()> {
    open(ctx, library)?;

    let result = match (command, old, new) {
        (Some(command), _, _) => ctx.api.update_command(&ctx.session, &command)?,
        (None, Some(old), Some(new)) => ctx.api.update_text(&ctx.session, &old, &new)?,
        _ => {
            return Err(VaultError::InvalidFormat(
                "give <old> <new>, or --command 'Update: \"old text\" with: \"new text\"'"
                    .to_string(),
            ))
        }
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(
    ctx: &mut AppContext,
    library: &str,
    keyword: &str,
    lines: Option<&str>,
) -> Result<()> {
    open(ctx, library)?;

    let result = match lines {
        Some(selection) => ctx.api.delete_keyword(&ctx.session, keyword, selection)?,
        None => {
            let mut result = ctx.api.delete_candidates(&ctx.session, keyword)?;
            print!(
                "{}",
                render_line_matches(&result.line_matches, "Lines containing the keyword:")
            );
            if !result.line_matches.is_empty() {
                result.add_message(CmdMessage::info(
                    "Run again with --lines to choose the lines to delete from.",
                ));
            }
            result
        }
    };
    print_messages(&result.messages);
    Ok(())
}

fn insert_position(at: InsertAt, line: Option<usize>, after: bool) -> Result<Position> {
    Ok(match at {
        InsertAt::Start => Position::Start,
        InsertAt::End => Position::End,
        InsertAt::Line => Position::Line {
            offset: line.ok_or_else(|| {
                VaultError::InvalidFormat("--line is required with --at line".to_string())
            })?,
            direction: if after {
                Direction::After
            } else {
                Direction::Before
            },
        },
    })
}

fn handle_insert(
    ctx: &mut AppContext,
    library: &str,
    section: &str,
    position: Position,
    text: &str,
    yes: bool,
) -> Result<()> {
    open(ctx, library)?;

    let pending = ctx.api.plan_insert(&ctx.session, section, position, text)?;
    print!("{}", render_preview(&pending));
    let confirmed = yes || prompt::confirm("Apply this change?")?;
    let result = ctx.api.commit_insert(pending, confirmed)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &mut AppContext, library: &str, keyword: &str, lines: bool) -> Result<()> {
    open(ctx, library)?;

    if lines {
        let result = ctx.api.search_lines(&ctx.session, keyword)?;
        let header = format!("Matches found ({}):", result.line_matches.len());
        print!("{}", render_line_matches(&result.line_matches, &header));
        print_messages(&result.messages);
    } else {
        let result = ctx.api.search_sections(&ctx.session, keyword)?;
        print!("{}", render_section_matches(&result.section_matches, keyword));
        print_messages(&result.messages);
    }
    Ok(())
}

fn handle_export(ctx: &mut AppContext, library: &str, output: Option<&str>) -> Result<()> {
    open(ctx, library)?;
    let result = ctx.api.export_pdf(&ctx.session, output)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let result = ctx.api.config(action)?;
    print!("{}", render_config(&result.config_entries));
    print_messages(&result.messages);
    Ok(())
}
