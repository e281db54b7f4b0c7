//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `generate repository` - Scaffold a repository for an entity
//! - `generate criteria` - Scaffold a criterion

pub mod args;

pub use args::{Cli, Commands};
