//! Generic repository over a single SeaORM entity.

use sea_orm::{ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel};

use super::base::{CriteriaRepository, DeleteRepository, ReadRepository, WriteRepository};
use super::criteria::CriteriaStack;

/// Repository bound to the table of entity `E`.
///
/// Cheap to build: the connection is a pooled handle, so construct one per
/// request and push the criteria that request needs.
pub struct Repository<E: EntityTrait> {
    db: DatabaseConnection,
    criteria: CriteriaStack<E>,
    fillable: Option<Vec<E::Column>>,
}

impl<E: EntityTrait> Repository<E> {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_criteria(db, CriteriaStack::new())
    }

    /// Create a repository starting from an existing criteria stack
    pub fn with_criteria(db: DatabaseConnection, criteria: CriteriaStack<E>) -> Self {
        Self {
            db,
            criteria,
            fillable: None,
        }
    }

    /// Restrict `create`/`update` to these columns
    pub fn with_fillable(mut self, columns: impl IntoIterator<Item = E::Column>) -> Self {
        self.fillable = Some(columns.into_iter().collect());
        self
    }
}

impl<E: EntityTrait> CriteriaRepository<E> for Repository<E> {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn criteria(&self) -> &CriteriaStack<E> {
        &self.criteria
    }

    fn criteria_mut(&mut self) -> &mut CriteriaStack<E> {
        &mut self.criteria
    }
}

impl<E: EntityTrait> ReadRepository<E> for Repository<E> {}

impl<E, A> WriteRepository<E, A> for Repository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<A>,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
{
    fn fillable(&self) -> Option<&[E::Column]> {
        self.fillable.as_deref()
    }
}

impl<E: EntityTrait> DeleteRepository<E> for Repository<E> {}
