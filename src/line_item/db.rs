//! Database operations for line items.
//!
//! Income and expense items share the same columns and live in one table per [ListKind].

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::LineItemId,
    line_item::{LineItem, ListKind, NewLineItem},
    user::UserID,
};

const COLUMNS: &str = "id, inserted_at, is_complete, task, user_id, amount";

/// Insert a line item and return the stored row with its generated ID.
pub fn create_line_item(
    kind: ListKind,
    item: &NewLineItem,
    inserted_at: OffsetDateTime,
    connection: &Connection,
) -> Result<LineItem, Error> {
    let query = format!(
        "INSERT INTO {} (inserted_at, is_complete, task, user_id, amount)
        VALUES (?1, 0, ?2, ?3, ?4)
        RETURNING {COLUMNS};",
        kind.table_name()
    );

    connection
        .prepare(&query)?
        .query_row(
            (
                inserted_at,
                item.task.as_ref(),
                item.owner.as_i64(),
                item.amount,
            ),
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve all line items of `kind` owned by `owner`, ordered by ID ascending.
pub fn get_line_items(
    kind: ListKind,
    owner: UserID,
    connection: &Connection,
) -> Result<Vec<LineItem>, Error> {
    let query = format!(
        "SELECT {COLUMNS} FROM {} WHERE user_id = :user_id ORDER BY id ASC;",
        kind.table_name()
    );

    connection
        .prepare(&query)?
        .query_map(&[(":user_id", &owner.as_i64())], map_row)?
        .map(|maybe_item| maybe_item.map_err(|error| error.into()))
        .collect()
}

/// Set the completion flag of a line item and return the updated row.
///
/// # Errors
///
/// Returns [Error::UpdateMissingItem] if `owner` has no item with `id`.
pub fn set_line_item_complete(
    kind: ListKind,
    owner: UserID,
    id: LineItemId,
    is_complete: bool,
    connection: &Connection,
) -> Result<LineItem, Error> {
    let query = format!(
        "UPDATE {} SET is_complete = ?1 WHERE id = ?2 AND user_id = ?3 RETURNING {COLUMNS};",
        kind.table_name()
    );

    connection
        .prepare(&query)?
        .query_row((is_complete, id, owner.as_i64()), map_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingItem,
            error => error.into(),
        })
}

/// Delete a line item by ID.
///
/// # Errors
///
/// Returns [Error::DeleteMissingItem] if `owner` has no item with `id`.
pub fn delete_line_item(
    kind: ListKind,
    owner: UserID,
    id: LineItemId,
    connection: &Connection,
) -> Result<(), Error> {
    let query = format!(
        "DELETE FROM {} WHERE id = ?1 AND user_id = ?2",
        kind.table_name()
    );
    let rows_affected = connection.execute(&query, (id, owner.as_i64()))?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingItem);
    }

    Ok(())
}

/// Initialize the income and expense tables.
pub fn create_line_item_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    for kind in [ListKind::Income, ListKind::Expense] {
        let table = kind.table_name();

        connection.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY,
                inserted_at TEXT NOT NULL,
                is_complete INTEGER,
                task TEXT,
                user_id INTEGER NOT NULL,
                amount REAL
            );

            CREATE INDEX IF NOT EXISTS idx_{table}_user_id ON {table}(user_id);"
        ))?;
    }

    Ok(())
}

fn map_row(row: &Row) -> Result<LineItem, rusqlite::Error> {
    let id = row.get(0)?;
    let created_at = row.get(1)?;
    let is_complete = row.get(2)?;
    let task: Option<String> = row.get(3)?;
    let owner = UserID::new(row.get(4)?);
    let amount = row.get(5)?;

    Ok(LineItem {
        id,
        task: task.unwrap_or_default(),
        amount,
        is_complete,
        owner,
        created_at,
    })
}


#[cfg(test)]
mod line_item_query_tests {
    use rusqlite::Connection;
    use time::OffsetDateTime;

    use crate::{
        Error,
        line_item::{ListKind, NewLineItem, TaskLabel},
        user::UserID,
    };

    use super::{
        create_line_item, create_line_item_tables, delete_line_item, get_line_items,
        set_line_item_complete,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_line_item_tables(&connection).expect("Could not create line item tables");
        connection
    }

    fn new_item(task: &str, amount: Option<f64>, owner: i64) -> NewLineItem {
        NewLineItem {
            task: TaskLabel::new(task).unwrap(),
            amount,
            owner: UserID::new(owner),
        }
    }

    #[test]
    fn create_line_item_succeeds() {
        let connection = get_test_db_connection();
        let item = new_item("Salary", Some(1000.0), 1);

        let created = create_line_item(
            ListKind::Income,
            &item,
            OffsetDateTime::now_utc(),
            &connection,
        )
        .expect("Could not create line item");

        assert!(created.id > 0);
        assert_eq!(created.task, "Salary");
        assert_eq!(created.amount, Some(1000.0));
        assert_eq!(created.is_complete, Some(false));
        assert_eq!(created.owner, UserID::new(1));
    }

    #[test]
    fn create_line_item_keeps_missing_amount() {
        let connection = get_test_db_connection();

        let created = create_line_item(
            ListKind::Expense,
            &new_item("Coffee", None, 1),
            OffsetDateTime::now_utc(),
            &connection,
        )
        .unwrap();

        assert_eq!(created.amount, None);
    }

    #[test]
    fn get_line_items_is_ordered_by_id_and_scoped_to_owner() {
        let connection = get_test_db_connection();
        let now = OffsetDateTime::now_utc();
        let first =
            create_line_item(ListKind::Income, &new_item("A", Some(1.0), 1), now, &connection)
                .unwrap();
        create_line_item(ListKind::Income, &new_item("B", Some(2.0), 2), now, &connection)
            .unwrap();
        let third =
            create_line_item(ListKind::Income, &new_item("C", Some(3.0), 1), now, &connection)
                .unwrap();

        let got = get_line_items(ListKind::Income, UserID::new(1), &connection)
            .expect("Could not get line items");

        assert_eq!(got, vec![first, third]);
    }

    #[test]
    fn lists_are_kept_separate() {
        let connection = get_test_db_connection();
        let now = OffsetDateTime::now_utc();
        create_line_item(ListKind::Income, &new_item("Pay", Some(5.0), 1), now, &connection)
            .unwrap();

        let expenses = get_line_items(ListKind::Expense, UserID::new(1), &connection).unwrap();

        assert!(expenses.is_empty(), "want no expenses, got {expenses:?}");
    }

    #[test]
    fn set_line_item_complete_returns_updated_row() {
        let connection = get_test_db_connection();
        let item = create_line_item(
            ListKind::Expense,
            &new_item("Rent", Some(500.0), 1),
            OffsetDateTime::now_utc(),
            &connection,
        )
        .unwrap();

        let updated =
            set_line_item_complete(ListKind::Expense, UserID::new(1), item.id, true, &connection)
                .expect("Could not update line item");

        assert_eq!(updated.is_complete, Some(true));
        assert_eq!(updated.id, item.id);
        assert_eq!(updated.amount, item.amount);
    }

    #[test]
    fn set_line_item_complete_with_invalid_id_returns_error() {
        let connection = get_test_db_connection();

        let result =
            set_line_item_complete(ListKind::Expense, UserID::new(1), 999, true, &connection);

        assert_eq!(result, Err(Error::UpdateMissingItem));
    }

    #[test]
    fn set_line_item_complete_for_other_owner_returns_error() {
        let connection = get_test_db_connection();
        let item = create_line_item(
            ListKind::Expense,
            &new_item("Rent", Some(500.0), 1),
            OffsetDateTime::now_utc(),
            &connection,
        )
        .unwrap();

        let result =
            set_line_item_complete(ListKind::Expense, UserID::new(2), item.id, true, &connection);

        assert_eq!(result, Err(Error::UpdateMissingItem));
    }

    #[test]
    fn delete_line_item_succeeds() {
        let connection = get_test_db_connection();
        let item = create_line_item(
            ListKind::Income,
            &new_item("Bonus", Some(50.0), 1),
            OffsetDateTime::now_utc(),
            &connection,
        )
        .unwrap();

        let result = delete_line_item(ListKind::Income, UserID::new(1), item.id, &connection);

        assert_eq!(result, Ok(()));
        assert_eq!(
            get_line_items(ListKind::Income, UserID::new(1), &connection),
            Ok(vec![])
        );
    }

    #[test]
    fn delete_line_item_with_invalid_id_returns_error() {
        let connection = get_test_db_connection();

        let result = delete_line_item(ListKind::Income, UserID::new(1), 42, &connection);

        assert_eq!(result, Err(Error::DeleteMissingItem));
    }
}
