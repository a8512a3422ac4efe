//! Implements a SQLite backed line item store.
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::LineItemId,
    line_item::{
        LineItem, ListKind, NewLineItem, create_line_item, delete_line_item, get_line_items,
        set_line_item_complete,
    },
    stores::LineItemStore,
    user::UserID,
};

/// Create, retrieve, update and delete line items in SQLite.
#[derive(Debug, Clone)]
pub struct SQLiteLineItemStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteLineItemStore {
    /// Create a new store from the SQLite `connection`.
    ///
    /// The caller should ensure the line item tables exist, e.g. with [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

#[async_trait]
impl LineItemStore for SQLiteLineItemStore {
    async fn fetch_all(&self, kind: ListKind, owner: UserID) -> Result<Vec<LineItem>, Error> {
        let connection = self.lock()?;
        get_line_items(kind, owner, &connection)
    }

    async fn insert(&self, kind: ListKind, item: NewLineItem) -> Result<LineItem, Error> {
        let connection = self.lock()?;
        create_line_item(kind, &item, OffsetDateTime::now_utc(), &connection)
    }

    async fn set_complete(
        &self,
        kind: ListKind,
        owner: UserID,
        id: LineItemId,
        is_complete: bool,
    ) -> Result<LineItem, Error> {
        let connection = self.lock()?;
        set_line_item_complete(kind, owner, id, is_complete, &connection)
    }

    async fn delete(&self, kind: ListKind, owner: UserID, id: LineItemId) -> Result<(), Error> {
        let connection = self.lock()?;
        delete_line_item(kind, owner, id, &connection)
    }
}
