//! Database Layering - repositories and criteria over SeaORM
//!
//! This crate provides a generic repository pattern for SeaORM entities:
//! CRUD access through composable traits, and criteria that narrow every
//! query a repository runs.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **infra**: Repositories, criteria and filesystem access
//! - **types**: Shared types (pagination, column projection)
//! - **utils**: Code generation templates and creators
//! - **errors**: Centralized error handling
//!
//! # Example
//!
//! ```rust,ignore
//! use database_layering::{Columns, CriteriaRepository, ReadRepository, Repository, Where};
//!
//! let mut posts = Repository::<post::Entity>::new(db);
//! posts.push_criteria(Where::eq(post::Column::Status, "published"));
//! let published: Vec<post::Model> = posts.all(Columns::All).await?;
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Scaffold a repository for the `post` entity
//! cargo run -- generate repository post
//!
//! # Scaffold a criterion for the `post` entity
//! cargo run -- generate criteria PublishedOnly --entity post
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod infra;
pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use infra::{
    CriteriaRepository, CriteriaStack, Criterion, CrudRepository, DeleteRepository, Limit,
    Operator, OrderBy, PrimaryKeyOf, ReadRepository, Repository, Where, WriteRepository,
};
pub use types::{Columns, Paginated, PaginationMeta, PaginationParams};
