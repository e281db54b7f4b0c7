//! Code generation templates.

/// Render a repository for `entity` implementing every repository trait
pub fn render_repository(name: &str, entity: &str, entity_module: &str) -> String {
    format!(
        r#"//! {name} backed by the `{entity}` entity.

use database_layering::{{
    CriteriaRepository, CriteriaStack, DeleteRepository, ReadRepository, WriteRepository,
}};
use sea_orm::DatabaseConnection;

use {entity_module}::{entity}::{{ActiveModel, Column, Entity}};

/// Repository for `{entity}` records.
pub struct {name} {{
    db: DatabaseConnection,
    criteria: CriteriaStack<Entity>,
}}

impl {name} {{
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {{
        Self {{
            db,
            criteria: CriteriaStack::new(),
        }}
    }}
}}

impl CriteriaRepository<Entity> for {name} {{
    fn db(&self) -> &DatabaseConnection {{
        &self.db
    }}

    fn criteria(&self) -> &CriteriaStack<Entity> {{
        &self.criteria
    }}

    fn criteria_mut(&mut self) -> &mut CriteriaStack<Entity> {{
        &mut self.criteria
    }}
}}

impl ReadRepository<Entity> for {name} {{}}

impl WriteRepository<Entity, ActiveModel> for {name} {{
    /// Columns `create` and `update` accept (`None` accepts all)
    fn fillable(&self) -> Option<&[Column]> {{
        None
    }}
}}

impl DeleteRepository<Entity> for {name} {{}}
"#
    )
}

/// Render a criterion, bound to `entity` when given, generic otherwise
pub fn render_criterion(name: &str, entity: Option<&str>, entity_module: &str) -> String {
    match entity {
        Some(entity) => format!(
            r#"//! {name} criterion for the `{entity}` entity.

use database_layering::Criterion;
use sea_orm::Select;

use {entity_module}::{entity}::Entity;

/// Narrows `{entity}` queries.
pub struct {name};

impl Criterion<Entity> for {name} {{
    fn apply(&self, query: Select<Entity>) -> Select<Entity> {{
        // e.g. `query.filter(Column::Status.eq("published"))`
        query
    }}
}}
"#
        ),
        None => format!(
            r#"//! {name} criterion.

use database_layering::Criterion;
use sea_orm::{{EntityTrait, Select}};

/// Narrows queries of any entity.
pub struct {name};

impl<E: EntityTrait> Criterion<E> for {name} {{
    fn apply(&self, query: Select<E>) -> Select<E> {{
        // e.g. `query.limit(10)`
        query
    }}
}}
"#
        ),
    }
}

/// Convert to snake_case
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev: Option<char> = None;

    for c in s.chars() {
        if c == '-' || c.is_whitespace() {
            result.push('_');
        } else if c.is_uppercase() {
            if matches!(prev, Some(p) if p.is_lowercase() || p.is_ascii_digit()) {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
        prev = Some(c);
    }

    result
}

/// Convert to PascalCase
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}
