//! Validation

use std::fmt;

use thiserror::Error;

use crate::sequence::SequenceExhausted;

/// A form field that must be filled before an order leaves draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    /// Customer name
    CustomerName,

    /// Customer phone number
    CustomerPhone,

    /// Equipment model
    EquipmentModel,

    /// Equipment serial number
    SerialNumber,

    /// Order priority
    Priority,
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderField::CustomerName => "customer name",
            OrderField::CustomerPhone => "customer phone",
            OrderField::EquipmentModel => "equipment model",
            OrderField::SerialNumber => "serial number",
            OrderField::Priority => "priority",
        })
    }
}

/// User-facing validation failures.
///
/// Every variant is recoverable: the rejected operation leaves the desk as it
/// was and the user can correct the input and retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The part code was empty or whitespace.
    #[error("part code is required")]
    MissingPartCode,

    /// The part name was empty or whitespace.
    #[error("part name is required")]
    MissingPartName,

    /// The quantity was not a whole number of at least one.
    #[error("quantity must be a whole number of at least 1, got {0:?}")]
    InvalidQuantity(String),

    /// The unit price was below zero.
    #[error("unit price cannot be negative")]
    NegativeUnitPrice,

    /// A line or order total does not fit in the amount range.
    #[error("amount is too large")]
    AmountOverflow,

    /// A required order field was left blank.
    #[error("{0} is required")]
    MissingField(OrderField),

    /// A pending order was saved without any parts.
    #[error("add at least one part to the order")]
    NoParts,

    /// An order form is already being edited.
    #[error("an order form is already open")]
    FormAlreadyOpen,

    /// The operation needs an open order form.
    #[error("no order form is open")]
    NoActiveForm,

    /// No order number is left to give the form.
    #[error(transparent)]
    SequenceExhausted(#[from] SequenceExhausted),
}

/// Returns true when the value is empty once surrounding whitespace is removed.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_names_the_field() {
        let error = ValidationError::MissingField(OrderField::SerialNumber);

        assert_eq!(error.to_string(), "serial number is required");
    }

    #[test]
    fn whitespace_only_is_blank() {
        assert!(is_blank("   \t"));
        assert!(is_blank(""));
        assert!(!is_blank(" x "));
    }
}
