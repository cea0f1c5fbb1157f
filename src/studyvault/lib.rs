//! # StudyVault Architecture
//!
//! StudyVault keeps study notes as Markdown "libraries": one `.md` file per
//! library, split into sections by `## ` headings. The crate is a library with
//! a CLI client on top.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, formats output                │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, checks the Session            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Read whole file → apply one mutation/query → write back  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - LibraryBackend trait: FsBackend, MemBackend (testing)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sections
//!
//! A line whose trimmed text starts with `## ` opens a section, which runs
//! until the next such line or the end of the file. Sections are never stored;
//! every query rescans the file. Anything above the first heading (such as the
//! `# name Library` title) belongs to no section.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`store`]: Storage abstraction and implementations
//! - [`text`]: Lossless line buffer used by every mutation
//! - [`model`]: Core data types (`Library`, `Section`, `Position`)
//! - [`session`]: The currently loaded library
//! - [`export`]: Text layout, pagination and PDF output
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod init;
pub mod model;
pub mod session;
pub mod store;
pub mod text;
