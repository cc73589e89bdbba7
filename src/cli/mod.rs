//! CLI module
//!
//! Command-line interface for browsing feeds.
//!
//! # Commands
//!
//! - `trending` - walk pages of the popular listing
//! - `search` - keyword search
//! - `watch` - record a watch and print the embed URL
//! - `history` - show or clear the persisted watch history

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
