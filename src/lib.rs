//! Tally is a personal finance tracker for recording income and expenses.
//!
//! Each user keeps two lists of line items, income and expenses. A list keeps
//! its items in step with a row store, totals the item amounts and converts the
//! total into a foreign currency using live exchange rates.
//!
//! The main entry point is [ListStore], which is parameterised by a
//! [LineItemStore] for persistence and a [RateSource] for exchange rates.

#![warn(missing_docs)]

mod aggregate;
mod config;
mod database_id;
mod db;
mod error;
mod format;
mod list_store;
mod user;

pub mod currency;
pub mod line_item;
pub mod stores;

#[cfg(test)]
mod test_utils;

pub use aggregate::total_amount;
pub use config::{
    API_BASE_URL_VAR, API_KEY_VAR, ConversionConfig, DEFAULT_API_BASE_URL,
    DEFAULT_SOURCE_CURRENCY, DEFAULT_TARGET_CURRENCY, SOURCE_CURRENCY_VAR, TARGET_CURRENCY_VAR,
};
pub use currency::{
    ConversionResult, CurrencyCode, CurrencyConverter, ExchangeRateApi, RateSource, RateTable,
};
pub use database_id::{DatabaseID, LineItemId};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use format::{format_conversion, format_money};
pub use line_item::{LineItem, ListKind, NewLineItem, TaskLabel};
pub use list_store::{ConversionStatus, ListSnapshot, ListStore};
pub use stores::{LineItemStore, SQLiteLineItemStore};
pub use user::UserID;
