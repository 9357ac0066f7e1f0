//! Order number sequence

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Default order number prefix.
pub const DEFAULT_PREFIX: &str = "PED-";

/// Default first sequence value.
pub const DEFAULT_SEED: u64 = 1001;

const WIDTH: usize = 6;

/// Human-readable order number, e.g. `PED-001001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Format a sequence value with the given prefix.
    pub fn format(prefix: &str, value: u64) -> Self {
        Self(format!("{prefix}{value:0width$}", width = WIDTH))
    }

    /// The number as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderNumber {
    fn from(value: &str) -> Self {
        Self(value.trim().to_string())
    }
}

/// Every value up to `u64::MAX` has been issued.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("order number sequence is exhausted")]
pub struct SequenceExhausted;

/// Monotonic source of order numbers.
///
/// A number is consumed every time an order form is opened, so a form that is
/// abandoned leaves a gap in the sequence. Once `u64::MAX` has been issued the
/// sequence refuses to issue again rather than repeat a number.
#[derive(Debug, Clone)]
pub struct OrderSequence {
    prefix: String,
    next: u64,
    exhausted: bool,
}

impl OrderSequence {
    /// Create a sequence whose first number uses `seed`.
    pub fn new(prefix: impl Into<String>, seed: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: seed,
            exhausted: false,
        }
    }

    /// Consume and return the next number.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceExhausted`] once `u64::MAX` has been issued.
    pub fn issue(&mut self) -> Result<OrderNumber, SequenceExhausted> {
        if self.exhausted {
            return Err(SequenceExhausted);
        }

        let number = self.peek();

        match self.next.checked_add(1) {
            Some(next) => self.next = next,
            None => self.exhausted = true,
        }

        Ok(number)
    }

    /// Whether the sequence has run out of numbers.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// The number the next call to [`OrderSequence::issue`] will return, if
    /// the sequence is not exhausted.
    pub fn peek(&self) -> OrderNumber {
        OrderNumber::format(&self.prefix, self.next)
    }

    /// Move the sequence forward so the next issued value is at least `value`.
    ///
    /// The sequence never moves backwards.
    pub fn advance_to(&mut self, value: u64) {
        self.next = self.next.max(value);
    }

    /// The raw value of the next number.
    pub fn next_value(&self) -> u64 {
        self.next
    }

    /// The prefix prepended to every number.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for OrderSequence {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, DEFAULT_SEED)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn issues_zero_padded_numbers_from_seed() -> TestResult {
        let mut sequence = OrderSequence::new("PED-", 1001);

        let issued = (0..3)
            .map(|_| sequence.issue().map(|number| number.to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        assert_eq!(issued, ["PED-001001", "PED-001002", "PED-001003"]);

        Ok(())
    }

    #[test]
    fn peek_does_not_consume() -> TestResult {
        let mut sequence = OrderSequence::default();

        assert_eq!(sequence.peek().as_str(), "PED-001001");
        assert_eq!(sequence.peek().as_str(), "PED-001001");
        assert_eq!(sequence.issue()?.as_str(), "PED-001001");
        assert_eq!(sequence.peek().as_str(), "PED-001002");

        Ok(())
    }

    #[test]
    fn wide_values_are_not_truncated() -> TestResult {
        let mut sequence = OrderSequence::new("OS-", 1_234_567);

        assert_eq!(sequence.issue()?.as_str(), "OS-1234567");

        Ok(())
    }

    #[test]
    fn last_value_is_issued_once_then_refused() -> TestResult {
        let mut sequence = OrderSequence::new("PED-", u64::MAX - 1);

        let before_last = sequence.issue()?;
        let last = sequence.issue()?;

        assert_ne!(before_last, last);
        assert_eq!(last, OrderNumber::format("PED-", u64::MAX));
        assert!(sequence.is_exhausted());
        assert_eq!(sequence.issue(), Err(SequenceExhausted));
        assert_eq!(sequence.issue(), Err(SequenceExhausted));

        Ok(())
    }

    #[test]
    fn advance_never_moves_backwards() {
        let mut sequence = OrderSequence::new("PED-", 1002);

        sequence.advance_to(1000);
        assert_eq!(sequence.next_value(), 1002);

        sequence.advance_to(1010);
        assert_eq!(sequence.next_value(), 1010);
    }
}
