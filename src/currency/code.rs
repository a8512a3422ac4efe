use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A three letter ISO 4217 style currency code, e.g. "LKR", stored in upper case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Create a currency code, normalising it to upper case.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidCurrencyCode] if `code` is not exactly three
    /// ASCII letters after trimming whitespace.
    pub fn new(code: &str) -> Result<Self, Error> {
        let trimmed = code.trim();

        if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(trimmed.to_ascii_uppercase()))
        } else {
            Err(Error::InvalidCurrencyCode(code.to_owned()))
        }
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyCode::new(s)
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
