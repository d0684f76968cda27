//! Find-or-create resolution of authors and publishers by exact name.
//!
//! Lookup and creation run as one unit of work under the gateway lock, so
//! two resolutions of the same name inside this process can never both
//! create a row. Nothing in storage enforces name uniqueness; rows created by
//! other processes may still duplicate a name, in which case the oldest row
//! is returned.

use libris_catalog::types::{Author, Publisher};
use libris_db::operations::OperationError;
use libris_db::{Entity, Gateway, queries};
use rusqlite::Connection;

/// Resolves related entity names to persisted identities.
#[derive(Clone)]
pub struct EntityReconciler {
    gateway: Gateway,
}

impl EntityReconciler {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Return the author with exactly this name, creating it if absent.
    pub fn resolve_author(&self, name: &str) -> Result<Author, OperationError> {
        self.resolve(name, queries::find_author_by_name, |n| Author::named(n))
    }

    /// Return the publisher with exactly this name, creating it if absent.
    pub fn resolve_publisher(&self, name: &str) -> Result<Publisher, OperationError> {
        self.resolve(name, queries::find_publisher_by_name, |n| {
            Publisher::named(n)
        })
    }

    fn resolve<T: Entity>(
        &self,
        name: &str,
        find: fn(&Connection, &str) -> Result<Option<T>, OperationError>,
        create: fn(&str) -> T,
    ) -> Result<T, OperationError> {
        self.gateway.transaction(|conn| {
            if let Some(existing) = find(conn, name)? {
                return Ok(existing);
            }
            let mut entity = create(name);
            let id = entity.write(conn)?;
            entity.set_id(id);
            log::debug!("Created {} '{}' (id {})", T::KIND, name, id);
            Ok(entity)
        })
    }
}
