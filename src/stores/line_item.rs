//! Defines the line item store trait.

use async_trait::async_trait;

use crate::{
    Error,
    database_id::LineItemId,
    line_item::{LineItem, ListKind, NewLineItem},
    user::UserID,
};

/// Handles the creation, retrieval, update and removal of line items.
///
/// Each call is one round trip to the backing store. Access control is the
/// store's responsibility: mutations only affect rows owned by `owner`.
#[async_trait]
pub trait LineItemStore: Send + Sync {
    /// Retrieve every line item of `kind` owned by `owner`, ordered by ID ascending.
    async fn fetch_all(&self, kind: ListKind, owner: UserID) -> Result<Vec<LineItem>, Error>;

    /// Insert a new line item and return the stored row.
    async fn insert(&self, kind: ListKind, item: NewLineItem) -> Result<LineItem, Error>;

    /// Set the completion flag of a line item and return the stored row.
    async fn set_complete(
        &self,
        kind: ListKind,
        owner: UserID,
        id: LineItemId,
        is_complete: bool,
    ) -> Result<LineItem, Error>;

    /// Remove a line item.
    async fn delete(&self, kind: ListKind, owner: UserID, id: LineItemId) -> Result<(), Error>;
}
