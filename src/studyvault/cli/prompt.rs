//! User input. On a terminal this goes through dialoguer; when stdin is piped
//! prompts are written to stdout and answers read line by line, so scripted
//! sessions and tests behave the same way as a person typing.

use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::io::{self, BufRead, IsTerminal, Write};
use studyvault::error::{Result, VaultError};

pub fn is_interactive() -> bool {
    io::stdin().is_terminal()
}

/// One trimmed line of input. End of input is an `UnexpectedEof` error.
pub fn input(prompt: &str) -> Result<String> {
    if is_interactive() {
        let answer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_err)?;
        return Ok(answer.trim().to_string());
    }

    print!("{}: ", prompt);
    io::stdout().flush()?;
    match read_line(&mut io::stdin().lock())? {
        Some(line) => Ok(line.trim().to_string()),
        None => Err(VaultError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed",
        ))),
    }
}

/// Lines up to the first empty one (or end of input), joined with newlines.
pub fn multiline(prompt: &str) -> Result<String> {
    println!("{} (end with an empty line):", prompt);
    Ok(read_until_blank(&mut io::stdin().lock())?)
}

pub fn confirm(prompt: &str) -> Result<bool> {
    if is_interactive() {
        return Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(prompt_err);
    }

    print!("{} (yes/no): ", prompt);
    io::stdout().flush()?;
    Ok(read_line(&mut io::stdin().lock())?
        .map(|answer| is_yes(&answer))
        .unwrap_or(false))
}

pub fn is_eof(err: &VaultError) -> bool {
    matches!(err, VaultError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

fn read_until_blank<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut lines = Vec::new();
    while let Some(line) = read_line(reader)? {
        if line.is_empty() {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

fn prompt_err(err: dialoguer::Error) -> VaultError {
    VaultError::Io(io::Error::other(err))
}
