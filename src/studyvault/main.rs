mod cli;

use colored::Colorize;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{} {}", "[!]".red().bold(), e);
        std::process::exit(1);
    }
}
