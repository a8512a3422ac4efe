//! Sets up the application's SQLite database.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, line_item::create_line_item_tables};

/// Create the tables for the income and expense lists if they do not exist yet.
///
/// # Errors
///
/// Returns an [Error::SqlError] if the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_line_item_tables(&transaction)?;

    transaction.commit()?;

    Ok(())
}
