//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination
// =============================================================================

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Maximum allowed items per page to prevent excessive queries
pub const MAX_PAGE_SIZE: u64 = 100;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

// =============================================================================
// Scaffolding
// =============================================================================

/// Directory generated repositories are written to
pub const DEFAULT_REPOSITORY_PATH: &str = "src/repositories";

/// Directory generated criteria are written to (one sub-directory per entity)
pub const DEFAULT_CRITERIA_PATH: &str = "src/criteria";

/// Module path generated code imports entities from
pub const DEFAULT_ENTITY_MODULE: &str = "crate::entities";

/// Suffix appended to repository names that lack it
pub const REPOSITORY_SUFFIX: &str = "Repository";
