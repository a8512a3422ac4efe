//! Contains the SQLite backed store and a helper for opening one.

pub mod line_item;

pub use line_item::SQLiteLineItemStore;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize};

/// Creates a [SQLiteLineItemStore] that owns `db_connection`.
///
/// This function will modify the database by adding the tables for the income
/// and expense lists to the database.
pub fn create_line_item_store(db_connection: Connection) -> Result<SQLiteLineItemStore, Error> {
    initialize(&db_connection)?;

    Ok(SQLiteLineItemStore::new(Arc::new(Mutex::new(
        db_connection,
    ))))
}
