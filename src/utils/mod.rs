//! Utility functions and helpers.

pub mod creators;
pub mod templates;

pub use creators::{CriteriaCreator, RepositoryCreator};
