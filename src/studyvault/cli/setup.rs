use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "studyvault",
    bin_name = "studyvault",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Markdown study notes, organized into libraries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the libraries (overrides config)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub library_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Library,
    Content,
    Data,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Library => "Library Commands:",
            CommandGroup::Content => "Content Commands:",
            CommandGroup::Data => "Data Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "create" | "list" | "shell" => Some(CommandGroup::Library),
            "index" | "store" | "update" | "delete" | "insert" => Some(CommandGroup::Content),
            "search" | "export" => Some(CommandGroup::Data),
            "config" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Library,
            CommandGroup::Content,
            CommandGroup::Data,
            CommandGroup::Misc,
        ]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("studyvault {version}\n"));
    output.push_str("Markdown study notes, organized into libraries\n");
    output.push('\n');
    output.push_str("Usage: studyvault [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --library-dir <DIR>  Directory holding the libraries\n");
    output.push_str("  -v, --verbose            Verbose output\n");
    output.push_str("  -h, --help               Print help\n");
    output.push_str("  -V, --version            Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a specific subcommand using clap's built-in rendering
pub fn print_subcommand_help(command: &Option<Commands>) {
    let name = match command {
        Some(Commands::Library(c)) => match c {
            LibraryCommands::Create { .. } => "create",
            LibraryCommands::List => "list",
            LibraryCommands::Shell => "shell",
        },
        Some(Commands::Content(c)) => match c {
            ContentCommands::Index { .. } => "index",
            ContentCommands::Store { .. } => "store",
            ContentCommands::Update { .. } => "update",
            ContentCommands::Delete { .. } => "delete",
            ContentCommands::Insert { .. } => "insert",
        },
        Some(Commands::Data(c)) => match c {
            DataCommands::Search { .. } => "search",
            DataCommands::Export { .. } => "export",
        },
        Some(Commands::Misc(MiscCommands::Config { .. })) => "config",
        None => {
            print_grouped_help();
            return;
        }
    };

    let mut cmd = Cli::command();
    if let Some(subcmd) = cmd.find_subcommand_mut(name) {
        print!("{}", subcmd.render_help());
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Library(LibraryCommands),

    #[command(flatten)]
    Content(ContentCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum LibraryCommands {
    /// Create a new library
    #[command(alias = "n", display_order = 1)]
    Create { name: String },

    /// List libraries
    #[command(alias = "ls", display_order = 2)]
    List,

    /// Interactive menu (default)
    #[command(display_order = 3)]
    Shell,
}

#[derive(Subcommand, Debug)]
pub enum ContentCommands {
    /// List the sections of a library
    #[command(display_order = 10)]
    Index {
        library: String,

        /// Print the content of section N from the listing
        #[arg(long, value_name = "N")]
        show: Option<String>,
    },

    /// Append a new section (body read from stdin when omitted)
    #[command(display_order = 11)]
    Store {
        library: String,

        title: String,

        /// Body words (joined with spaces)
        #[arg(trailing_var_arg = true)]
        body: Vec<String>,
    },

    /// Replace the first occurrence of some text
    #[command(display_order = 12)]
    Update {
        library: String,

        old: Option<String>,

        new: Option<String>,

        /// Command form: Update: "old" with: "new"
        #[arg(long, conflicts_with_all = ["old", "new"])]
        command: Option<String>,
    },

    /// Remove a keyword from selected lines (lists candidates without --lines)
    #[command(alias = "rm", display_order = 13)]
    Delete {
        library: String,

        keyword: String,

        /// Line numbers, comma separated (e.g. 2,4)
        #[arg(long, value_name = "LINES")]
        lines: Option<String>,
    },

    /// Insert a line into a section
    #[command(display_order = 14)]
    Insert {
        library: String,

        /// Section title (without ##)
        section: String,

        /// Where in the section to insert
        #[arg(long, value_enum)]
        at: InsertAt,

        /// Line of the section body, with --at line
        #[arg(long, value_name = "N")]
        line: Option<usize>,

        /// Insert after the line instead of before it
        #[arg(long)]
        after: bool,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,

        text: String,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum InsertAt {
    Start,
    End,
    Line,
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Search a library (whole sections by default)
    #[command(display_order = 20)]
    Search {
        library: String,

        keyword: String,

        /// Show matching lines instead of sections
        #[arg(long)]
        lines: bool,
    },

    /// Export a library to PDF
    #[command(display_order = 21)]
    Export {
        library: String,

        /// File name inside the export directory (default: <library>.pdf)
        #[arg(long, short)]
        output: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration
    #[command(display_order = 30)]
    Config {
        /// Configuration key (library-dir, export-dir)
        key: Option<String>,

        /// Value to set (empty string resets to default)
        value: Option<String>,
    },
}
