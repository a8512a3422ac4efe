//! Defines the app level error type.

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string, or a string of only whitespace, was used as the task
    /// label of a line item.
    #[error("Task cannot be empty")]
    EmptyTask,

    /// The amount entered for a line item could not be parsed as a number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// A currency code was not made up of exactly three ASCII letters.
    #[error("\"{0}\" is not a valid currency code, expected three letters such as \"LKR\"")]
    InvalidCurrencyCode(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to delete a line item that does not exist
    #[error("tried to delete a line item that is not in the database")]
    DeleteMissingItem,

    /// Tried to update a line item that does not exist
    #[error("tried to update a line item that is not in the database")]
    UpdateMissingItem,

    /// The request to the exchange rate service could not be completed, or its
    /// response body could not be decoded.
    #[error("exchange rate request failed: {0}")]
    RateRequest(String),

    /// The exchange rate service responded with a non-success status code.
    #[error("exchange rate service returned status {0}")]
    RateStatus(u16),

    /// The exchange rate service did not include a rate for the target currency.
    #[error("no exchange rate available for {0}")]
    MissingRate(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        match value.status() {
            Some(status) => Error::RateStatus(status.as_u16()),
            None => Error::RateRequest(value.to_string()),
        }
    }
}
