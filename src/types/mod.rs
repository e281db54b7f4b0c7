//! Shared types for DRY compliance.

mod columns;
mod pagination;

pub use columns::Columns;
pub use pagination::{Paginated, PaginationMeta, PaginationParams};
