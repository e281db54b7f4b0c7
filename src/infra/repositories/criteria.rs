//! Criteria - composable query filters.
//!
//! A criterion transforms a `Select<E>` into another `Select<E>`. Criteria
//! are pushed onto a [`CriteriaStack`] and folded over the entity's base
//! query, left to right, before a repository executes anything.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use sea_orm::sea_query::{BinOper, Expr, SimpleExpr};
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Select, Value};

use crate::errors::{AppError, AppResult};

/// A single query transformation.
///
/// Any `Fn(Select<E>) -> Select<E>` closure is a criterion, so one-off
/// filters don't need a named type.
pub trait Criterion<E: EntityTrait>: Send + Sync {
    fn apply(&self, query: Select<E>) -> Select<E>;
}

impl<E, F> Criterion<E> for F
where
    E: EntityTrait,
    F: Fn(Select<E>) -> Select<E> + Send + Sync,
{
    fn apply(&self, query: Select<E>) -> Select<E> {
        self(query)
    }
}

/// Ordered list of criteria plus a flag that bypasses all of them.
pub struct CriteriaStack<E: EntityTrait> {
    criteria: Vec<Arc<dyn Criterion<E>>>,
    skip: bool,
}

impl<E: EntityTrait> CriteriaStack<E> {
    pub fn new() -> Self {
        Self {
            criteria: Vec::new(),
            skip: false,
        }
    }

    /// Append a criterion. Identical criteria are not deduplicated.
    pub fn push<C>(&mut self, criterion: C)
    where
        C: Criterion<E> + 'static,
    {
        self.criteria.push(Arc::new(criterion));
    }

    /// Set or clear the skip flag. The stored criteria are kept either way.
    pub fn skip(&mut self, status: bool) {
        self.skip = status;
    }

    pub fn is_skipped(&self) -> bool {
        self.skip
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Criterion<E>>> {
        self.criteria.iter()
    }

    /// Remove every criterion and clear the skip flag
    pub fn clear(&mut self) {
        self.criteria.clear();
        self.skip = false;
    }

    /// Fold `query` through every criterion in insertion order.
    ///
    /// Returns `query` untouched when the stack is skipped or empty.
    pub fn apply(&self, query: Select<E>) -> Select<E> {
        if self.skip {
            tracing::trace!(criteria = self.criteria.len(), "Criteria skipped");
            return query;
        }

        self.criteria
            .iter()
            .fold(query, |query, criterion| criterion.apply(query))
    }
}

impl<E: EntityTrait> Default for CriteriaStack<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityTrait> Clone for CriteriaStack<E> {
    fn clone(&self) -> Self {
        Self {
            criteria: self.criteria.clone(),
            skip: self.skip,
        }
    }
}

impl<E: EntityTrait> fmt::Debug for CriteriaStack<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CriteriaStack")
            .field("criteria", &self.criteria.len())
            .field("skip", &self.skip)
            .finish()
    }
}

// =============================================================================
// Operators
// =============================================================================

/// Comparison used by [`Where`] and bulk deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Equal to (=)
    Equal,
    /// Not equal to (!=)
    NotEqual,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal to (>=)
    GreaterThanOrEqual,
    /// Less than (<)
    LessThan,
    /// Less than or equal to (<=)
    LessThanOrEqual,
    /// Pattern matching (LIKE)
    Like,
    /// Negated pattern matching (NOT LIKE)
    NotLike,
}

impl Operator {
    /// Build `column <op> value`
    pub fn expr<C, V>(self, column: C, value: V) -> SimpleExpr
    where
        C: ColumnTrait,
        V: Into<Value>,
    {
        let value: Value = value.into();
        match self {
            Operator::Equal => column.eq(value),
            Operator::NotEqual => column.ne(value),
            Operator::GreaterThan => column.gt(value),
            Operator::GreaterThanOrEqual => column.gte(value),
            Operator::LessThan => column.lt(value),
            Operator::LessThanOrEqual => column.lte(value),
            Operator::Like => Expr::col((column.entity_name(), column)).binary(BinOper::Like, value),
            Operator::NotLike => {
                Expr::col((column.entity_name(), column)).binary(BinOper::NotLike, value)
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "="),
            Self::NotEqual => write!(f, "!="),
            Self::GreaterThan => write!(f, ">"),
            Self::GreaterThanOrEqual => write!(f, ">="),
            Self::LessThan => write!(f, "<"),
            Self::LessThanOrEqual => write!(f, "<="),
            Self::Like => write!(f, "LIKE"),
            Self::NotLike => write!(f, "NOT LIKE"),
        }
    }
}

impl FromStr for Operator {
    type Err = AppError;

    fn from_str(selector: &str) -> AppResult<Self> {
        let normalized = selector
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();

        match normalized.as_str() {
            "=" | "==" => Ok(Self::Equal),
            "!=" | "<>" => Ok(Self::NotEqual),
            ">" => Ok(Self::GreaterThan),
            ">=" => Ok(Self::GreaterThanOrEqual),
            "<" => Ok(Self::LessThan),
            "<=" => Ok(Self::LessThanOrEqual),
            "like" => Ok(Self::Like),
            "not like" => Ok(Self::NotLike),
            _ => Err(AppError::validation(format!(
                "Unsupported selector: '{}'",
                selector
            ))),
        }
    }
}

// =============================================================================
// Built-in criteria
// =============================================================================

/// `WHERE column <op> value`
#[derive(Debug, Clone)]
pub struct Where<C> {
    column: C,
    operator: Operator,
    value: Value,
}

impl<C: ColumnTrait> Where<C> {
    pub fn new(column: C, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            column,
            operator,
            value: value.into(),
        }
    }

    pub fn eq(column: C, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::Equal, value)
    }
}

impl<E: EntityTrait> Criterion<E> for Where<E::Column> {
    fn apply(&self, query: Select<E>) -> Select<E> {
        query.filter(self.operator.expr(self.column, self.value.clone()))
    }
}

/// `ORDER BY column <direction>`
#[derive(Debug, Clone)]
pub struct OrderBy<C> {
    column: C,
    order: Order,
}

impl<C: ColumnTrait> OrderBy<C> {
    pub fn asc(column: C) -> Self {
        Self {
            column,
            order: Order::Asc,
        }
    }

    pub fn desc(column: C) -> Self {
        Self {
            column,
            order: Order::Desc,
        }
    }
}

impl<E: EntityTrait> Criterion<E> for OrderBy<E::Column> {
    fn apply(&self, query: Select<E>) -> Select<E> {
        query.order_by(self.column, self.order.clone())
    }
}

/// `LIMIT n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit(pub u64);

impl<E: EntityTrait> Criterion<E> for Limit {
    fn apply(&self, query: Select<E>) -> Select<E> {
        query.limit(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    mod post {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
        #[sea_orm(table_name = "posts")]
        pub struct Model {
            #[sea_orm(primary_key)]
            pub id: i32,
            pub title: String,
            pub status: String,
            pub views: i32,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}
    }

    fn sql(query: &Select<post::Entity>) -> String {
        query.build(DbBackend::Sqlite).to_string()
    }

    fn base() -> Select<post::Entity> {
        post::Entity::find()
    }

    #[test]
    fn test_empty_stack_returns_query_unchanged() {
        let stack = CriteriaStack::<post::Entity>::new();
        assert_eq!(sql(&stack.apply(base())), sql(&base()));
    }

    #[test]
    fn test_replay_is_deterministic() {
        let mut stack = CriteriaStack::<post::Entity>::new();
        stack.push(Where::eq(post::Column::Status, "published"));
        stack.push(Limit(5));

        assert_eq!(sql(&stack.apply(base())), sql(&stack.apply(base())));
    }

    #[test]
    fn test_criteria_fold_left_to_right() {
        let a = Where::eq(post::Column::Status, "published");
        let b = Where::new(post::Column::Views, Operator::GreaterThan, 10);

        let mut stack = CriteriaStack::<post::Entity>::new();
        stack.push(a.clone());
        stack.push(b.clone());

        let expected = Criterion::<post::Entity>::apply(&b, a.apply(base()));
        let reversed = Criterion::<post::Entity>::apply(&a, b.apply(base()));
        let folded = sql(&stack.apply(base()));

        assert_eq!(folded, sql(&expected));
        assert_ne!(folded, sql(&reversed));

        let status_at = folded.find("status").unwrap();
        let views_at = folded.find("views").unwrap();
        assert!(status_at < views_at);
    }

    #[test]
    fn test_skip_bypasses_every_criterion() {
        let mut stack = CriteriaStack::<post::Entity>::new();
        stack.push(Where::eq(post::Column::Status, "draft"));
        stack.push(Limit(1));
        stack.skip(true);

        assert_eq!(sql(&stack.apply(base())), sql(&base()));
        assert_eq!(stack.len(), 2);

        stack.skip(false);
        assert!(sql(&stack.apply(base())).contains("LIMIT"));
    }

    #[test]
    fn test_duplicates_accumulate() {
        let mut stack = CriteriaStack::<post::Entity>::new();
        stack.push(Where::eq(post::Column::Status, "draft"));
        stack.push(Where::eq(post::Column::Status, "draft"));

        assert_eq!(stack.len(), 2);
        assert_eq!(sql(&stack.apply(base())).matches("'draft'").count(), 2);
    }

    #[test]
    fn test_closure_criterion() {
        let mut stack = CriteriaStack::<post::Entity>::new();
        stack.push(|query: Select<post::Entity>| query.filter(post::Column::Views.gte(100)));

        assert!(sql(&stack.apply(base())).contains(r#""posts"."views" >= 100"#));
    }

    #[test]
    fn test_order_by_and_limit() {
        let mut stack = CriteriaStack::<post::Entity>::new();
        stack.push(OrderBy::desc(post::Column::Views));
        stack.push(Limit(3));

        let rendered = sql(&stack.apply(base()));
        assert!(rendered.contains(r#"ORDER BY "posts"."views" DESC"#));
        assert!(rendered.contains("LIMIT 3"));
    }

    #[test]
    fn test_clear_resets_stack() {
        let mut stack = CriteriaStack::<post::Entity>::new();
        stack.push(Limit(1));
        stack.skip(true);
        stack.clear();

        assert!(stack.is_empty());
        assert!(!stack.is_skipped());
    }

    #[test]
    fn test_operator_parsing() {
        assert_eq!("=".parse::<Operator>().unwrap(), Operator::Equal);
        assert_eq!("<>".parse::<Operator>().unwrap(), Operator::NotEqual);
        assert_eq!(">=".parse::<Operator>().unwrap(), Operator::GreaterThanOrEqual);
        assert_eq!("LIKE".parse::<Operator>().unwrap(), Operator::Like);
        assert_eq!("not   like".parse::<Operator>().unwrap(), Operator::NotLike);
        assert!(matches!(
            "between".parse::<Operator>(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_like_operator_renders() {
        let expr = Operator::Like.expr(post::Column::Title, "%rust%");
        let rendered = sql(&base().filter(expr));
        assert!(rendered.contains(r#""posts"."title" LIKE '%rust%'"#));
    }
}
