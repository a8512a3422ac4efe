//! Text formatting of money amounts for display.

use numfmt::{Formatter, Precision};

use crate::{currency::CurrencyCode, list_store::ConversionStatus};

/// Format `amount` with the currency code, thousands separators and two decimal places,
/// e.g. "LKR 1,234.50".
pub fn format_money(currency: &CurrencyCode, amount: f64) -> String {
    let make_formatter = |prefix: String| {
        Formatter::currency(&prefix)
            .expect("currency prefix is short enough for numfmt")
            .precision(Precision::Decimals(2))
    };

    let mut formatted_string = if amount < 0.0 {
        make_formatter(format!("-{currency} ")).fmt_string(amount.abs())
    } else if amount > 0.0 {
        make_formatter(format!("{currency} ")).fmt_string(amount)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return format!("{currency} 0.00");
    };

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}

/// Describe the converted total for display.
pub fn format_conversion(currency: &CurrencyCode, status: &ConversionStatus) -> String {
    match status {
        ConversionStatus::NotRequested | ConversionStatus::InFlight { .. } => {
            format!("{currency} Loading...")
        }
        ConversionStatus::Settled(result) => match result.converted_amount {
            Some(amount) => format_money(currency, amount),
            None => format!("{currency} unavailable"),
        },
    }
}
