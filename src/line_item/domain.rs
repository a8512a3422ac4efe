//! Core line item domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, database_id::LineItemId, user::UserID};

/// A validated, non-empty task label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct TaskLabel(String);

impl TaskLabel {
    /// Create a task label from user input, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyTask] if `task` is empty after trimming.
    pub fn new(task: &str) -> Result<Self, Error> {
        let task = task.trim();

        if task.is_empty() {
            Err(Error::EmptyTask)
        } else {
            Ok(Self(task.to_string()))
        }
    }
}

impl AsRef<str> for TaskLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for TaskLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskLabel::new(s)
    }
}

impl Display for TaskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which of the two tracked lists a line item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl ListKind {
    /// The name of the table that stores this kind of line item.
    ///
    /// Expenses live in the `todos` table for compatibility with existing databases.
    pub fn table_name(&self) -> &'static str {
        match self {
            ListKind::Income => "income",
            ListKind::Expense => "todos",
        }
    }

    /// The heading used when showing the list to the user.
    pub fn label(&self) -> &'static str {
        match self {
            ListKind::Income => "Income",
            ListKind::Expense => "Expenses",
        }
    }
}

impl Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single income or expense entry, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// The ID assigned by the store.
    pub id: LineItemId,
    /// What the money was for.
    pub task: String,
    /// How much money, `None` when the user left it blank.
    pub amount: Option<f64>,
    /// Whether the user has ticked the item off. `None` is treated as not complete.
    pub is_complete: Option<bool>,
    /// The user the item belongs to.
    pub owner: UserID,
    /// When the store created the item.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl LineItem {
    /// The amount, counting a missing amount as zero.
    pub fn amount_or_zero(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }

    /// Whether the item is complete, counting a missing flag as not complete.
    pub fn is_complete(&self) -> bool {
        self.is_complete.unwrap_or(false)
    }
}

/// The data needed to insert a line item. The store assigns the ID and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLineItem {
    /// What the money was for.
    pub task: TaskLabel,
    /// How much money, if known.
    pub amount: Option<f64>,
    /// The user the item belongs to.
    pub owner: UserID,
}

/// Parse the text of an amount input.
///
/// Blank input means no amount was given.
///
/// # Errors
///
/// Returns [Error::InvalidAmount] if the text is not blank and is not a finite number.
pub fn parse_amount(text: &str) -> Result<Option<f64>, Error> {
    let text = text.trim();

    if text.is_empty() {
        return Ok(None);
    }

    match text.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(Some(amount)),
        _ => Err(Error::InvalidAmount(text.to_owned())),
    }
}
