//! Commands module - CLI command implementations.

pub mod generate;
