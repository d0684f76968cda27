//! Generic repository over catalog entity types.
//!
//! Every table uses an `INTEGER PRIMARY KEY` named `id`, so lookups and
//! deletes are written once here; each entity only describes its columns,
//! its row mapping, and how its rows are written.

use rusqlite::{Connection, Row, params};

use crate::operations::OperationError;

/// A catalog entity stored in its own table.
pub trait Entity: Clone + Sized {
    /// Entity name used in errors and logs.
    const KIND: &'static str;
    /// Backing table.
    const TABLE: &'static str;
    /// Select list read by [`Entity::from_row`]. Must start with `id`.
    const COLUMNS: &'static str;
    /// Ordering used by [`find_all`].
    const ORDER_BY: &'static str = "id";

    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: i64);

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Load related rows once the base row has been mapped.
    fn hydrate(&mut self, _conn: &Connection) -> Result<(), OperationError> {
        Ok(())
    }

    /// Insert the entity (no id) or overwrite the row with its id.
    /// Returns the row id.
    fn write(&self, conn: &Connection) -> Result<i64, OperationError>;
}

/// Persist an entity in its own transaction and return it with its id set.
pub fn save<T: Entity>(conn: &Connection, entity: &T) -> Result<T, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let id = entity.write(&tx)?;
    tx.commit()?;

    let mut saved = entity.clone();
    saved.set_id(id);
    Ok(saved)
}

/// Find an entity by id.
pub fn find_by_id<T: Entity>(conn: &Connection, id: i64) -> Result<Option<T>, OperationError> {
    let sql = format!("SELECT {} FROM {} WHERE id = ?1", T::COLUMNS, T::TABLE);
    let result = conn.query_row(&sql, params![id], T::from_row);
    match result {
        Ok(mut entity) => {
            entity.hydrate(conn)?;
            Ok(Some(entity))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List every entity of a type.
pub fn find_all<T: Entity>(conn: &Connection) -> Result<Vec<T>, OperationError> {
    let sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        T::COLUMNS,
        T::TABLE,
        T::ORDER_BY
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], T::from_row)?;
    let mut entities = rows.collect::<Result<Vec<_>, _>>()?;
    for entity in &mut entities {
        entity.hydrate(conn)?;
    }
    Ok(entities)
}

/// Delete an entity row by id, in its own transaction.
///
/// Returns `false` when no row had that id.
pub fn delete_by_id<T: Entity>(conn: &Connection, id: i64) -> Result<bool, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let changed = tx.execute(
        &format!("DELETE FROM {} WHERE id = ?1", T::TABLE),
        params![id],
    )?;
    tx.commit()?;
    Ok(changed > 0)
}

/// Delete a persisted entity.
pub fn delete<T: Entity>(conn: &Connection, entity: &T) -> Result<(), OperationError> {
    let id = entity.id().ok_or(OperationError::Unsaved {
        entity_type: T::KIND,
    })?;
    if !delete_by_id::<T>(conn, id)? {
        return Err(OperationError::NotFound {
            entity_type: T::KIND.to_string(),
            id: id.to_string(),
        });
    }
    Ok(())
}
