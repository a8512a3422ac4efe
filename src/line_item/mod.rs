//! Income and expense line items.

mod db;
mod domain;

pub use db::{
    create_line_item, create_line_item_tables, delete_line_item, get_line_items,
    set_line_item_complete,
};
pub use domain::{LineItem, ListKind, NewLineItem, TaskLabel, parse_amount};
