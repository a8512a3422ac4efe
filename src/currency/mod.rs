//! Conversion of list totals into a foreign currency using live exchange rates.

mod code;
mod converter;
mod rates;

pub use code::CurrencyCode;
pub use converter::{ConversionResult, CurrencyConverter, RequestSequence};
pub use rates::{ExchangeRateApi, RateSource, RateTable};
