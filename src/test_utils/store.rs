//! A line item store for tests that records calls and can be told to fail.

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use rusqlite::Connection;

use crate::{
    Error,
    database_id::LineItemId,
    line_item::{LineItem, ListKind, NewLineItem},
    stores::{LineItemStore, SQLiteLineItemStore, sqlite::create_line_item_store},
    user::UserID,
};

/// Wraps an in-memory [SQLiteLineItemStore].
#[derive(Debug, Clone)]
pub(crate) struct RecordingStore {
    inner: SQLiteLineItemStore,
    calls: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        let connection = Connection::open_in_memory().unwrap();

        Self {
            inner: create_line_item_store(connection).expect("Could not create test store"),
            calls: Arc::new(AtomicUsize::new(0)),
            fail: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The number of store calls made so far, including failed ones.
    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every following call fail with [Error::DatabaseLockError].
    pub(crate) fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn record(&self) -> Result<(), Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            Err(Error::DatabaseLockError)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LineItemStore for RecordingStore {
    async fn fetch_all(&self, kind: ListKind, owner: UserID) -> Result<Vec<LineItem>, Error> {
        self.record()?;
        self.inner.fetch_all(kind, owner).await
    }

    async fn insert(&self, kind: ListKind, item: NewLineItem) -> Result<LineItem, Error> {
        self.record()?;
        self.inner.insert(kind, item).await
    }

    async fn set_complete(
        &self,
        kind: ListKind,
        owner: UserID,
        id: LineItemId,
        is_complete: bool,
    ) -> Result<LineItem, Error> {
        self.record()?;
        self.inner.set_complete(kind, owner, id, is_complete).await
    }

    async fn delete(&self, kind: ListKind, owner: UserID, id: LineItemId) -> Result<(), Error> {
        self.record()?;
        self.inner.delete(kind, owner, id).await
    }
}
