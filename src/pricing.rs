//! Pricing
//!
//! Amounts are kept in minor units of a single currency. Decimal input is
//! rounded to two places before conversion.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// A monetary amount in the desk currency.
pub type Amount = Money<'static, Currency>;

/// Errors that can occur while turning text into an amount.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("amount cannot be negative: {0}")]
    Negative(Decimal),

    /// The amount does not fit in minor units.
    #[error("amount is out of range: {0}")]
    OutOfRange(Decimal),

    /// The text is not a decimal number.
    #[error("invalid amount: {0}")]
    Invalid(String),

    /// The currency code is not supported.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Resolve an ISO currency code.
///
/// # Errors
///
/// Returns [`PriceError::UnknownCurrency`] for codes other than BRL, USD, EUR and GBP.
pub fn currency(code: &str) -> Result<&'static Currency, PriceError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "BRL" => Ok(iso::BRL),
        "USD" => Ok(iso::USD),
        "EUR" => Ok(iso::EUR),
        "GBP" => Ok(iso::GBP),
        other => Err(PriceError::UnknownCurrency(other.to_string())),
    }
}

/// Convert a decimal amount into minor units.
///
/// # Errors
///
/// - [`PriceError::Negative`]: the amount is below zero.
/// - [`PriceError::OutOfRange`]: the amount does not fit in an `i64` of minor units.
pub fn to_minor_units(amount: Decimal) -> Result<i64, PriceError> {
    if amount < Decimal::ZERO {
        return Err(PriceError::Negative(amount));
    }

    amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or(PriceError::OutOfRange(amount))
}

/// Parse a decimal amount such as `"250.00"` into minor units.
///
/// # Errors
///
/// Returns [`PriceError::Invalid`] if the text is not a number, otherwise
/// see [`to_minor_units`].
pub fn parse_minor_units(text: &str) -> Result<i64, PriceError> {
    let amount = text
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| PriceError::Invalid(text.to_string()))?;

    to_minor_units(amount)
}

/// Calculate `quantity × unit_price`, or `None` on overflow.
pub fn line_total(quantity: u32, unit_price: Amount) -> Option<Amount> {
    unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .map(|minor| Money::from_minor(minor, unit_price.currency()))
}

/// Sum a sequence of amounts in the given currency, or `None` on overflow.
///
/// An empty sequence sums to zero.
pub fn checked_sum(
    amounts: impl IntoIterator<Item = Amount>,
    currency: &'static Currency,
) -> Option<Amount> {
    amounts
        .into_iter()
        .try_fold(0_i64, |acc, amount| acc.checked_add(amount.to_minor_units()))
        .map(|minor| Money::from_minor(minor, currency))
}
