//! Contains the trait and implementations for the row store that holds line items.

mod line_item;

pub mod sqlite;

pub use line_item::LineItemStore;
pub use sqlite::SQLiteLineItemStore;
