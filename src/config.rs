//! Settings for the currency conversion of list totals.

use std::fmt::Debug;

use crate::{Error, currency::CurrencyCode};

/// The environment variable holding the exchange rate API key, if the service needs one.
pub const API_KEY_VAR: &str = "TALLY_RATE_API_KEY";
/// The environment variable that overrides [DEFAULT_API_BASE_URL].
pub const API_BASE_URL_VAR: &str = "TALLY_RATE_API_URL";
/// The environment variable that overrides [DEFAULT_SOURCE_CURRENCY].
pub const SOURCE_CURRENCY_VAR: &str = "TALLY_SOURCE_CURRENCY";
/// The environment variable that overrides [DEFAULT_TARGET_CURRENCY].
pub const TARGET_CURRENCY_VAR: &str = "TALLY_TARGET_CURRENCY";

/// The exchange rate service used when no other URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://open.er-api.com/v6";
/// The currency amounts are recorded in.
pub const DEFAULT_SOURCE_CURRENCY: &str = "LKR";
/// The currency totals are converted to.
pub const DEFAULT_TARGET_CURRENCY: &str = "AED";

/// The config for converting totals from the local currency to a foreign currency.
///
/// These values are fixed for the lifetime of the process.
#[derive(Clone, PartialEq)]
pub struct ConversionConfig {
    /// The base URL of the exchange rate service, without a trailing slash.
    pub api_base_url: String,
    /// The key sent with every exchange rate request, if any.
    pub api_key: Option<String>,
    /// The currency that line item amounts are recorded in.
    pub source_currency: CurrencyCode,
    /// The currency that totals are converted to.
    pub target_currency: CurrencyCode,
}

impl ConversionConfig {
    /// Create a config with the default service URL and currencies that sends `api_key`.
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: Some(api_key.to_owned()),
            ..Self::default()
        }
    }

    /// Read the config from the process environment.
    ///
    /// A missing or blank [API_KEY_VAR] is not an error: requests are sent without
    /// a key, and if the service rejects them the conversions settle as unavailable.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidCurrencyCode] if a currency override is not a valid code.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from `lookup`, which maps a variable name to its value.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut config = Self::default();

        match lookup(API_KEY_VAR).filter(|key| !key.trim().is_empty()) {
            Some(key) => config.api_key = Some(key.trim().to_owned()),
            None => {
                tracing::warn!("{API_KEY_VAR} is not set, requesting exchange rates without a key")
            }
        }

        if let Some(url) = lookup(API_BASE_URL_VAR) {
            config.api_base_url = url.trim().trim_end_matches('/').to_owned();
        }

        if let Some(code) = lookup(SOURCE_CURRENCY_VAR) {
            config.source_currency = CurrencyCode::new(&code)?;
        }

        if let Some(code) = lookup(TARGET_CURRENCY_VAR) {
            config.target_currency = CurrencyCode::new(&code)?;
        }

        Ok(config)
    }
}

/// The default service URL and currencies, without an API key.
impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            api_key: None,
            source_currency: CurrencyCode::new(DEFAULT_SOURCE_CURRENCY)
                .expect("default source currency is a valid currency code"),
            target_currency: CurrencyCode::new(DEFAULT_TARGET_CURRENCY)
                .expect("default target currency is a valid currency code"),
        }
    }
}

// The API key must not end up in logs.
impl Debug for ConversionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "********"))
            .field("source_currency", &self.source_currency)
            .field("target_currency", &self.target_currency)
            .finish()
    }
}
