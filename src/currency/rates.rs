use std::{collections::HashMap, fmt::Debug};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{Error, config::ConversionConfig, currency::CurrencyCode};

/// Exchange rates from one base currency to many other currencies.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RateTable {
    rates: HashMap<String, f64>,
}

impl RateTable {
    /// Create a rate table from currency code to rate pairs.
    pub fn new<'a>(rates: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            rates: rates
                .into_iter()
                .map(|(code, rate)| (code.to_owned(), rate))
                .collect(),
        }
    }

    /// The rate for converting one unit of the base currency into `currency`.
    pub fn rate(&self, currency: &CurrencyCode) -> Option<f64> {
        self.rates.get(currency.as_ref()).copied()
    }
}

/// Looks up the latest exchange rates for a base currency.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetch the latest rates from `base` to every currency the source knows about.
    ///
    /// Implementations make one request per call and must not cache results.
    async fn latest_rates(&self, base: &CurrencyCode) -> Result<RateTable, Error>;
}

/// A [RateSource] backed by an open.er-api.com compatible HTTP API.
#[derive(Clone)]
pub struct ExchangeRateApi {
    base_url: String,
    api_key: Option<String>,
    http_client: Client,
}

impl ExchangeRateApi {
    /// Create a client for the service and key in `config`.
    pub fn new(config: &ConversionConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            api_key: config.api_key.clone(),
            http_client: Client::new(),
        }
    }
}

impl Debug for ExchangeRateApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeRateApi")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "********"))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RateSource for ExchangeRateApi {
    async fn latest_rates(&self, base: &CurrencyCode) -> Result<RateTable, Error> {
        let url = format!("{}/latest/{}", self.base_url, base);
        tracing::debug!("Fetching exchange rates from {url}");

        let mut request = self.http_client.get(&url);

        if let Some(api_key) = &self.api_key {
            request = request.query(&[("apikey", api_key)]);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(Error::RateStatus(response.status().as_u16()));
        }

        let table = response
            .json::<RateTable>()
            .await
            .map_err(|error| Error::RateRequest(error.to_string()))?;

        Ok(table)
    }
}
