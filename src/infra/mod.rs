//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Repositories and criteria over the database
//! - Filesystem access for code generation

pub mod filesystem;
pub mod repositories;

pub use filesystem::{Filesystem, LocalFilesystem};
pub use repositories::{
    CriteriaRepository, CriteriaStack, Criterion, CrudRepository, DeleteRepository, Limit,
    Operator, OrderBy, PrimaryKeyOf, ReadRepository, Repository, Where, WriteRepository,
};

#[cfg(any(test, feature = "test-utils"))]
pub use filesystem::MockFilesystem;
