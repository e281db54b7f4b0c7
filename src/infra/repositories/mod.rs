//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! Criteria narrow the queries a repository runs without the caller
//! touching the query builder.

mod base;
mod criteria;
mod repository;

pub use base::{
    CriteriaRepository, CrudRepository, DeleteRepository, PrimaryKeyOf, ReadRepository,
    WriteRepository,
};
pub use criteria::{CriteriaStack, Criterion, Limit, Operator, OrderBy, Where};
pub use repository::Repository;
