//! Fixtures
//!
//! Seed data for a desk, loaded from YAML. The bundled sample set holds two
//! orders and moves the sequence to 1002.

use std::{fs, path::Path};

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    desk::ServiceDesk, fixtures::orders::OrdersFixture, orders::Order, sequence::DEFAULT_SEED,
    validation::ValidationError,
};

pub mod orders;

const SAMPLE: &str = include_str!("../../fixtures/orders/sample.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Price in a currency other than the desk's
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// A part or order broke a validation rule
    #[error("Invalid fixture data: {0}")]
    Validation(#[from] ValidationError),
}

/// A parsed set of orders ready to import into a desk.
#[derive(Debug, Clone)]
pub struct Fixture {
    orders: Vec<Order>,
    next_sequence: u64,
}

impl Fixture {
    /// The bundled sample orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the sample is not priced in `currency`.
    pub fn sample(currency: &'static Currency) -> Result<Self, FixtureError> {
        Self::from_yaml(SAMPLE, currency)
    }

    /// Load orders from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any order
    /// in it is invalid.
    pub fn from_path(path: impl AsRef<Path>, currency: &'static Currency) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents, currency)
    }

    /// Parse orders from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed, or if any order in it is
    /// invalid.
    pub fn from_yaml(contents: &str, currency: &'static Currency) -> Result<Self, FixtureError> {
        let fixture: OrdersFixture = serde_norway::from_str(contents)?;

        let orders = fixture
            .orders
            .into_iter()
            .map(|order| order.into_order(currency))
            .collect::<Result<Vec<_>, _>>()?;

        let next_sequence = fixture
            .next_sequence
            .unwrap_or_else(|| following_sequence(&orders));

        Ok(Self {
            orders,
            next_sequence,
        })
    }

    /// Parsed orders, in fixture order
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Sequence value the desk continues from
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Append the orders to `desk` and advance its sequence.
    pub fn load_into(self, desk: &mut ServiceDesk) {
        desk.import(self.orders, self.next_sequence);
    }
}

/// One past the highest numeric suffix among the order numbers.
fn following_sequence(orders: &[Order]) -> u64 {
    orders
        .iter()
        .filter_map(|order| {
            order
                .number()
                .as_str()
                .trim_start_matches(|ch: char| !ch.is_ascii_digit())
                .parse::<u64>()
                .ok()
        })
        .max()
        .map_or(DEFAULT_SEED, |highest| highest.saturating_add(1))
}
