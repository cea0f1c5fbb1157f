//! # CLI Behavior
//!
//! This is **one possible UI client** for studyvault, not the application
//! itself. For the overall architecture see the crate-level documentation of
//! the `studyvault` library.
//!
//! ## Naked Execution (`studyvault`)
//!
//! Running `studyvault` with no arguments starts the interactive shell, the
//! same as `studyvault shell`.
//!
//! ## One-shot Commands
//!
//! Every library command names its library explicitly
//! (`studyvault search bio mitosis`). `store` reads the body from stdin when
//! no body words are given and stdin is piped:
//!
//! ```text
//! cat notes.txt | studyvault store bio "Cell Division"
//! ```
//!
//! `insert` shows a preview and asks before writing; `--yes` skips the
//! question. Piped answers other than `y`/`yes` cancel.
//!
//! ## Exit Codes
//!
//! Errors print as `[!] message` on stderr and exit with status 1. Inside the
//! shell they are printed and the menu continues.

mod commands;
mod print;
mod prompt;
mod setup;
mod shell;

pub use commands::run;
