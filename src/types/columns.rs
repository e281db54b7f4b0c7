//! Column projection for read queries.

/// Which columns a read query returns.
///
/// `All` selects every column of the entity; `Only` narrows the `SELECT`
/// list, in which case the caller reads rows into a partial model (or
/// `serde_json::Value`) instead of the full entity model.
#[derive(Debug, Clone)]
pub enum Columns<C> {
    All,
    Only(Vec<C>),
}

impl<C> Columns<C> {
    /// Project onto the given columns
    pub fn only(columns: impl IntoIterator<Item = C>) -> Self {
        Columns::Only(columns.into_iter().collect())
    }
}

impl<C> Default for Columns<C> {
    fn default() -> Self {
        Columns::All
    }
}
