//! Order Fixtures

use jiff::{Timestamp, civil::Date};
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    orders::{Customer, Equipment, NewOrder, Order, Priority, Status},
    parts::Part,
    pricing,
    sequence::OrderNumber,
};

/// Wrapper for orders in YAML
#[derive(Debug, Deserialize)]
pub struct OrdersFixture {
    /// Next sequence value; derived from the highest order number when absent
    #[serde(default)]
    pub next_sequence: Option<u64>,

    /// Orders, in store order
    pub orders: Vec<OrderFixture>,
}

/// Order Fixture
#[derive(Debug, Deserialize)]
pub struct OrderFixture {
    /// Order number (e.g., "PED-001000")
    pub number: OrderNumber,

    /// Order date
    pub date: Date,

    /// Creation time
    pub created_at: Timestamp,

    /// Status code or alias
    pub status: Status,

    /// Priority code or alias
    pub priority: Priority,

    /// Customer details
    #[serde(default)]
    pub customer: Customer,

    /// Equipment details
    #[serde(default)]
    pub equipment: Equipment,

    /// Problem description
    #[serde(default)]
    pub description: String,

    /// Parts used
    #[serde(default)]
    pub parts: Vec<PartFixture>,
}

/// Part Fixture
#[derive(Debug, Deserialize)]
pub struct PartFixture {
    /// Part code
    pub code: String,

    /// Part name
    pub name: String,

    /// Quantity
    pub quantity: u32,

    /// Unit price (e.g., "15.00 BRL")
    pub unit_price: String,
}

impl PartFixture {
    fn into_part(self, currency: &'static Currency) -> Result<Part, FixtureError> {
        let (minor_units, price_currency) = parse_price(&self.unit_price)?;

        if price_currency != currency {
            return Err(FixtureError::CurrencyMismatch(
                currency.iso_alpha_code.to_string(),
                price_currency.iso_alpha_code.to_string(),
            ));
        }

        Ok(Part::priced(
            &self.code,
            &self.name,
            self.quantity,
            Money::from_minor(minor_units, currency),
        )?)
    }
}

impl OrderFixture {
    /// Build the order, pricing every part in `currency`.
    ///
    /// # Errors
    ///
    /// Returns an error if a price is malformed, is in another currency, or
    /// a part is invalid.
    pub fn into_order(self, currency: &'static Currency) -> Result<Order, FixtureError> {
        let parts = self
            .parts
            .into_iter()
            .map(|part| part.into_part(currency))
            .collect::<Result<Vec<_>, _>>()?;

        let order = NewOrder {
            number: self.number,
            date: self.date,
            customer: self.customer,
            equipment: self.equipment,
            priority: self.priority,
            description: self.description,
            parts,
            status: self.status,
            created_at: self.created_at,
        }
        .into_order(currency)?;

        Ok(order)
    }
}

/// Parse price string (e.g., "2.99 BRL") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let minor_units = pricing::parse_minor_units(amount)
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = pricing::currency(code)
        .map_err(|_err| FixtureError::UnknownCurrency(code.to_string()))?;

    Ok((minor_units, currency))
}
