use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    config::ConversionConfig,
    currency::{CurrencyCode, RateSource},
};

/// Identifies one dispatched conversion. Later dispatches have larger numbers.
pub type RequestSequence = u64;

/// A total paired with its value in the target currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// The total in the source currency.
    pub source_amount: f64,
    /// The total in the target currency, or `None` if the conversion failed.
    pub converted_amount: Option<f64>,
}

impl ConversionResult {
    /// A successful conversion.
    pub fn converted(source_amount: f64, converted_amount: f64) -> Self {
        Self {
            source_amount,
            converted_amount: Some(converted_amount),
        }
    }

    /// A conversion that could not be completed.
    pub fn unavailable(source_amount: f64) -> Self {
        Self {
            source_amount,
            converted_amount: None,
        }
    }
}

/// Converts totals from the configured source currency to the target currency
/// using live exchange rates.
///
/// The converter counts dispatched requests so that callers can tell whether a
/// result has been superseded by a conversion of a newer total.
#[derive(Debug)]
pub struct CurrencyConverter<R> {
    rates: R,
    config: ConversionConfig,
    latest_request: AtomicU64,
}

impl<R: RateSource> CurrencyConverter<R> {
    /// Create a converter that fetches rates from `rates`.
    pub fn new(rates: R, config: ConversionConfig) -> Self {
        Self {
            rates,
            config,
            latest_request: AtomicU64::new(0),
        }
    }

    /// The currency that totals are converted from.
    pub fn source_currency(&self) -> &CurrencyCode {
        &self.config.source_currency
    }

    /// The currency that totals are converted to.
    pub fn target_currency(&self) -> &CurrencyCode {
        &self.config.target_currency
    }

    /// Reserve the sequence number for a new conversion, superseding all earlier ones.
    pub fn next_request(&self) -> RequestSequence {
        self.latest_request.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `request` is the most recently dispatched conversion.
    pub fn is_latest(&self, request: RequestSequence) -> bool {
        self.latest_request.load(Ordering::SeqCst) == request
    }

    /// Convert `amount` with a freshly fetched rate.
    ///
    /// Failures are logged and reported as [ConversionResult::unavailable], this
    /// function never returns an error.
    pub async fn convert(&self, amount: f64) -> ConversionResult {
        match self.lookup_rate().await {
            Ok(rate) => ConversionResult::converted(amount, amount * rate),
            Err(error) => {
                tracing::error!(
                    "Could not convert {amount} {} to {}: {error}",
                    self.config.source_currency,
                    self.config.target_currency
                );
                ConversionResult::unavailable(amount)
            }
        }
    }

    async fn lookup_rate(&self) -> Result<f64, Error> {
        let table = self
            .rates
            .latest_rates(&self.config.source_currency)
            .await?;

        table
            .rate(&self.config.target_currency)
            .ok_or_else(|| Error::MissingRate(self.config.target_currency.to_string()))
    }
}
