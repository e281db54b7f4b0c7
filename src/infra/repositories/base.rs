//! Base repository traits following Interface Segregation Principle (ISP).
//!
//! These traits provide a foundation for all repositories with
//! common CRUD operations that can be composed as needed. Every read,
//! update and delete starts from the entity's base query folded through
//! the repository's criteria stack.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, IntoValueTuple, SimpleExpr};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    FromQueryResult, IdenStatic, IntoActiveModel, Iterable, PaginatorTrait, PrimaryKeyToColumn,
    PrimaryKeyTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, Select, Value,
};

use super::criteria::{CriteriaStack, Criterion, Operator};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::{Columns, Paginated, PaginationParams};

/// Primary key value type of an entity (a tuple for composite keys)
pub type PrimaryKeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// Table name, for log fields
fn table<E: EntityTrait>() -> String {
    E::default().as_str().to_owned()
}

/// `pk = id` (one equality per key column)
fn primary_key_condition<E: EntityTrait>(id: PrimaryKeyOf<E>) -> Condition {
    let mut values = id.into_value_tuple().into_iter();
    <E::PrimaryKey as Iterable>::iter().fold(Condition::all(), |condition, key| {
        match values.next() {
            Some(value) => condition.add(key.into_column().eq(value)),
            None => condition,
        }
    })
}

/// `pk IN (SELECT pk FROM <scope>)`, used to scope bulk statements by criteria
fn primary_key_in<E: EntityTrait>(scope: Select<E>) -> SimpleExpr {
    let keys: Vec<E::Column> = <E::PrimaryKey as Iterable>::iter()
        .map(|key| key.into_column())
        .collect();
    let subquery = scope.select_only().columns(keys.clone()).into_query();

    match keys.as_slice() {
        [key] => key.in_subquery(subquery),
        _ => Expr::tuple(
            keys.iter()
                .map(|key| Expr::col((key.entity_name(), *key)).into()),
        )
        .in_subquery(subquery),
    }
}

/// Narrow the `SELECT` list; an empty projection is rejected
fn project<E: EntityTrait>(query: Select<E>, columns: Columns<E::Column>) -> AppResult<Select<E>> {
    match columns {
        Columns::All => Ok(query),
        Columns::Only(columns) if columns.is_empty() => {
            Err(AppError::validation("Column list must not be empty"))
        }
        Columns::Only(columns) => Ok(query.select_only().columns(columns)),
    }
}

/// Criteria pipeline - the part every repository shares
#[async_trait]
pub trait CriteriaRepository<E>: Send + Sync
where
    E: EntityTrait,
{
    /// Get database connection reference
    fn db(&self) -> &DatabaseConnection;

    /// Current criteria (read-only)
    fn criteria(&self) -> &CriteriaStack<E>;

    /// Current criteria (mutable)
    fn criteria_mut(&mut self) -> &mut CriteriaStack<E>;

    /// Append a criterion to the stack
    fn push_criteria<C>(&mut self, criterion: C) -> &mut Self
    where
        C: Criterion<E> + 'static,
        Self: Sized,
    {
        self.criteria_mut().push(criterion);
        self
    }

    /// Enable or disable the whole stack without clearing it
    fn skip_criteria(&mut self, status: bool) -> &mut Self
    where
        Self: Sized,
    {
        self.criteria_mut().skip(status);
        self
    }

    /// Base query of the entity folded through the criteria stack
    fn apply_criteria(&self) -> Select<E> {
        self.criteria().apply(E::find())
    }

    /// Whether a record with this key is visible through the criteria
    async fn exists(&self, id: PrimaryKeyOf<E>) -> AppResult<bool> {
        let found = self
            .apply_criteria()
            .filter(primary_key_condition::<E>(id))
            .one(self.db())
            .await?;
        Ok(found.is_some())
    }
}

/// Read operations (Query) - Single Responsibility
#[async_trait]
pub trait ReadRepository<E>: CriteriaRepository<E>
where
    E: EntityTrait,
{
    /// Find all records
    async fn all<T>(&self, columns: Columns<E::Column>) -> AppResult<Vec<T>>
    where
        T: FromQueryResult + Send + Sync,
    {
        tracing::debug!(table = %table::<E>(), "all");
        project(self.apply_criteria(), columns)?
            .into_model::<T>()
            .all(self.db())
            .await
            .map_err(Into::into)
    }

    /// Find records one page at a time, ordered by primary key
    async fn paginate<T>(
        &self,
        params: &PaginationParams,
        columns: Columns<E::Column>,
    ) -> AppResult<Paginated<T>>
    where
        T: FromQueryResult + Send + Sync,
    {
        if params.per_page == 0 {
            return Err(AppError::validation("per_page must be at least 1"));
        }

        tracing::debug!(
            table = %table::<E>(),
            page = params.page,
            per_page = params.per_page,
            "paginate"
        );

        let query = <E::PrimaryKey as Iterable>::iter()
            .fold(self.apply_criteria(), |query, key| {
                query.order_by_asc(key.into_column())
            });

        let paginator = project(query, columns)?
            .into_model::<T>()
            .paginate(self.db(), params.limit());
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(params.page_index()).await?;

        Ok(Paginated::new(data, params.page.max(1), params.limit(), total))
    }

    /// Find a record by primary key
    async fn find<T>(&self, id: PrimaryKeyOf<E>, columns: Columns<E::Column>) -> AppResult<Option<T>>
    where
        T: FromQueryResult + Send + Sync,
    {
        tracing::debug!(table = %table::<E>(), ?id, "find");
        project(
            self.apply_criteria().filter(primary_key_condition::<E>(id)),
            columns,
        )?
        .into_model::<T>()
        .one(self.db())
        .await
        .map_err(Into::into)
    }

    /// Find a record by primary key, or fail with `NotFound`
    async fn find_or_fail(&self, id: PrimaryKeyOf<E>) -> AppResult<E::Model> {
        tracing::debug!(table = %table::<E>(), ?id, "find_or_fail");
        self.apply_criteria()
            .filter(primary_key_condition::<E>(id))
            .one(self.db())
            .await?
            .ok_or_not_found()
    }

    /// First record where `field = value`
    async fn find_by<T, V>(
        &self,
        field: E::Column,
        value: V,
        columns: Columns<E::Column>,
    ) -> AppResult<Option<T>>
    where
        T: FromQueryResult + Send + Sync,
        V: Into<Value> + Send,
    {
        tracing::debug!(table = %table::<E>(), field = field.as_str(), "find_by");
        project(self.apply_criteria().filter(field.eq(value)), columns)?
            .into_model::<T>()
            .one(self.db())
            .await
            .map_err(Into::into)
    }

    /// Every record where `field = value`
    async fn find_all_by<T, V>(
        &self,
        field: E::Column,
        value: V,
        columns: Columns<E::Column>,
    ) -> AppResult<Vec<T>>
    where
        T: FromQueryResult + Send + Sync,
        V: Into<Value> + Send,
    {
        tracing::debug!(table = %table::<E>(), field = field.as_str(), "find_all_by");
        project(self.apply_criteria().filter(field.eq(value)), columns)?
            .into_model::<T>()
            .all(self.db())
            .await
            .map_err(Into::into)
    }

    /// Every record matching all `(field, value)` pairs
    async fn find_where<T, I, V>(&self, conditions: I, columns: Columns<E::Column>) -> AppResult<Vec<T>>
    where
        T: FromQueryResult + Send + Sync,
        I: IntoIterator<Item = (E::Column, V)> + Send,
        V: Into<Value>,
    {
        let condition = conditions
            .into_iter()
            .fold(Condition::all(), |condition, (field, value)| {
                condition.add(field.eq(value))
            });

        tracing::debug!(table = %table::<E>(), "find_where");
        project(self.apply_criteria().filter(condition), columns)?
            .into_model::<T>()
            .all(self.db())
            .await
            .map_err(Into::into)
    }

    /// Apply one criterion to the base query, ignoring the stored stack
    async fn get_by_criteria<T, C>(&self, criterion: C, columns: Columns<E::Column>) -> AppResult<Vec<T>>
    where
        T: FromQueryResult + Send + Sync,
        C: Criterion<E>,
    {
        tracing::debug!(table = %table::<E>(), "get_by_criteria");
        let query = criterion.apply(E::find());
        project(query, columns)?
            .into_model::<T>()
            .all(self.db())
            .await
            .map_err(Into::into)
    }

    /// Count records visible through the criteria
    async fn count(&self) -> AppResult<u64>
    where
        E::Model: Sync,
    {
        self.apply_criteria()
            .count(self.db())
            .await
            .map_err(Into::into)
    }
}

/// Write operations (Command) - Single Responsibility
#[async_trait]
pub trait WriteRepository<E, A>: CriteriaRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<A>,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
{
    /// Columns `create` and `update` accept; `None` accepts every column
    fn fillable(&self) -> Option<&[E::Column]> {
        None
    }

    /// Reset every non-fillable field of `data` to `NotSet`
    fn guard(&self, mut data: A) -> A {
        let Some(fillable) = self.fillable() else {
            return data;
        };

        for column in <E::Column as Iterable>::iter() {
            let allowed = fillable.iter().any(|f| f.as_str() == column.as_str());
            if !allowed && data.get(column).is_set() {
                tracing::warn!(
                    table = %table::<E>(),
                    column = column.as_str(),
                    "Dropping guarded field"
                );
                data.not_set(column);
            }
        }

        data
    }

    /// Insert a new record through the mass-assignment guard
    async fn create(&self, data: A) -> AppResult<E::Model>
    where
        E::Model: Send,
    {
        tracing::debug!(table = %table::<E>(), "create");
        self.guard(data)
            .insert(self.db())
            .await
            .map_err(Into::into)
    }

    /// Insert a record as given, bypassing the guard
    async fn save_model(&self, data: A) -> AppResult<bool> {
        tracing::debug!(table = %table::<E>(), "save_model");
        let inserted = E::insert(data).exec_without_returning(self.db()).await?;
        Ok(inserted > 0)
    }

    /// Update the record with this key; `NotFound` if it is not visible
    async fn update(&self, data: A, id: PrimaryKeyOf<E>) -> AppResult<bool>
    where
        PrimaryKeyOf<E>: Clone,
    {
        tracing::debug!(table = %table::<E>(), ?id, "update");

        if !self.exists(id.clone()).await? {
            return Err(AppError::NotFound);
        }

        // Primary key is taken from `id` only
        let mut data = self.guard(data);
        for key in <E::PrimaryKey as Iterable>::iter() {
            data.not_set(key.into_column());
        }

        if !<E::Column as Iterable>::iter().any(|column| data.get(column).is_set()) {
            return Ok(false);
        }

        let result = E::update_many()
            .set(data)
            .filter(primary_key_condition::<E>(id))
            .exec(self.db())
            .await?;

        Ok(result.rows_affected > 0)
    }
}

/// Delete operations - Single Responsibility
#[async_trait]
pub trait DeleteRepository<E>: CriteriaRepository<E>
where
    E: EntityTrait,
{
    /// Delete the record with this key; `false` if it is absent
    async fn delete(&self, id: PrimaryKeyOf<E>) -> AppResult<bool> {
        tracing::debug!(table = %table::<E>(), ?id, "delete");
        let scope = self.apply_criteria().filter(primary_key_condition::<E>(id));
        let removed = self.delete_scoped(scope).await?;
        Ok(removed > 0)
    }

    /// Delete every record where `field <operator> value`; `false` if none matched
    async fn delete_all_by<V>(&self, field: E::Column, operator: Operator, value: V) -> AppResult<bool>
    where
        V: Into<Value> + Send,
    {
        tracing::debug!(
            table = %table::<E>(),
            field = field.as_str(),
            %operator,
            "delete_all_by"
        );
        let scope = self.apply_criteria().filter(operator.expr(field, value));
        let removed = self.delete_scoped(scope).await?;
        Ok(removed > 0)
    }

    /// Delete the rows selected by `scope`, returning how many went
    async fn delete_scoped(&self, scope: Select<E>) -> AppResult<u64> {
        let result = E::delete_many()
            .filter(primary_key_in::<E>(scope))
            .exec(self.db())
            .await?;
        Ok(result.rows_affected)
    }
}

/// Full CRUD repository - Combines all operations
/// Follows Open/Closed Principle: extend by implementing individual traits
pub trait CrudRepository<E, A>:
    ReadRepository<E> + WriteRepository<E, A> + DeleteRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<A>,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
{
}

// Auto-implement CrudRepository for types implementing all traits
impl<T, E, A> CrudRepository<E, A> for T
where
    T: ReadRepository<E> + WriteRepository<E, A> + DeleteRepository<E>,
    E: EntityTrait,
    E::Model: IntoActiveModel<A>,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
{
}
