//! Parts
//!
//! Line items and the draft buffer an order's parts are assembled in before
//! the order is saved.

use rusty_money::{Money, iso::Currency};
use tracing::debug;

use crate::{
    ids::TypedUuid,
    pricing::{self, Amount, PriceError},
    validation::{ValidationError, is_blank},
};

/// Part Id
pub type PartUuid = TypedUuid<Part>;

/// A priced line item.
///
/// Parts are immutable once created; the only way to change one is to remove
/// it and add a replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    id: PartUuid,
    code: String,
    name: String,
    quantity: u32,
    unit_price: Amount,
    line_total: Amount,
}

impl Part {
    /// Create a part from already-typed values.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingPartCode`] / [`ValidationError::MissingPartName`]: blank code or name.
    /// - [`ValidationError::InvalidQuantity`]: quantity of zero.
    /// - [`ValidationError::AmountOverflow`]: `quantity × unit_price` does not fit.
    pub fn priced(
        code: &str,
        name: &str,
        quantity: u32,
        unit_price: Amount,
    ) -> Result<Self, ValidationError> {
        if is_blank(code) {
            return Err(ValidationError::MissingPartCode);
        }

        if is_blank(name) {
            return Err(ValidationError::MissingPartName);
        }

        if quantity == 0 {
            return Err(ValidationError::InvalidQuantity(quantity.to_string()));
        }

        let line_total =
            pricing::line_total(quantity, unit_price).ok_or(ValidationError::AmountOverflow)?;

        Ok(Self {
            id: PartUuid::now(),
            code: code.trim().to_string(),
            name: name.trim().to_string(),
            quantity,
            unit_price,
            line_total,
        })
    }

    /// Part id
    pub fn id(&self) -> PartUuid {
        self.id
    }

    /// Part code, e.g. `DSP-001`
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Part name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of units
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price of a single unit
    pub fn unit_price(&self) -> Amount {
        self.unit_price
    }

    /// `quantity × unit_price`
    pub fn line_total(&self) -> Amount {
        self.line_total
    }
}

/// A part as typed into the add-part form.
///
/// All fields are raw text; [`NewPart::into_part`] applies the form's rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPart {
    /// Part code
    pub code: String,

    /// Part name
    pub name: String,

    /// Quantity, a whole number of at least one
    pub quantity: String,

    /// Unit price; anything that is not a number counts as zero
    pub unit_price: String,
}

impl NewPart {
    /// Convenience constructor for the four form fields.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        quantity: impl Into<String>,
        unit_price: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            quantity: quantity.into(),
            unit_price: unit_price.into(),
        }
    }

    /// Validate the form fields and price the part in `currency`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the code or name is blank, the
    /// quantity is not a whole number of at least one, or the unit price is
    /// negative.
    pub fn into_part(self, currency: &'static Currency) -> Result<Part, ValidationError> {
        if is_blank(&self.code) {
            return Err(ValidationError::MissingPartCode);
        }

        if is_blank(&self.name) {
            return Err(ValidationError::MissingPartName);
        }

        let quantity = self
            .quantity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|quantity| *quantity >= 1)
            .ok_or_else(|| ValidationError::InvalidQuantity(self.quantity.clone()))?;

        let unit_price_minor = match pricing::parse_minor_units(&self.unit_price) {
            Ok(minor) => minor,
            Err(PriceError::Negative(_)) => return Err(ValidationError::NegativeUnitPrice),
            Err(PriceError::OutOfRange(_)) => return Err(ValidationError::AmountOverflow),
            Err(PriceError::Invalid(_) | PriceError::UnknownCurrency(_)) => 0,
        };

        Part::priced(
            &self.code,
            &self.name,
            quantity,
            Money::from_minor(unit_price_minor, currency),
        )
    }
}

/// The parts of the order currently being created or edited.
#[derive(Debug, Clone)]
pub struct PartsBuffer {
    parts: Vec<Part>,
    currency: &'static Currency,
}

impl PartsBuffer {
    /// Create an empty buffer pricing parts in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            parts: Vec::new(),
            currency,
        }
    }

    /// Validate and append a part, returning the new part's id.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the part is rejected (see
    /// [`NewPart::into_part`]) or if the buffer total would overflow. The
    /// buffer is unchanged on error.
    pub fn add(&mut self, new_part: NewPart) -> Result<PartUuid, ValidationError> {
        let part = new_part.into_part(self.currency)?;

        pricing::checked_sum(
            self.parts
                .iter()
                .map(Part::line_total)
                .chain([part.line_total()]),
            self.currency,
        )
        .ok_or(ValidationError::AmountOverflow)?;

        debug!(code = part.code(), quantity = part.quantity(), "part added to draft");

        let id = part.id();
        self.parts.push(part);

        Ok(id)
    }

    /// Remove the part with the given id.
    ///
    /// Unknown ids leave the buffer untouched and return `None`.
    pub fn remove(&mut self, id: PartUuid) -> Option<Part> {
        let position = self.parts.iter().position(|part| part.id() == id)?;
        let part = self.parts.remove(position);

        debug!(code = part.code(), "part removed from draft");

        Some(part)
    }

    /// Discard every part.
    pub fn reset(&mut self) {
        self.parts.clear();
    }

    /// Replace the buffer contents, keeping the given parts' ids.
    pub fn replace(&mut self, parts: impl Into<Vec<Part>>) {
        self.parts = parts.into();
    }

    /// Sum of every part's line total.
    pub fn total(&self) -> Amount {
        let minor = self
            .parts
            .iter()
            .fold(0_i64, |acc, part| {
                acc.saturating_add(part.line_total().to_minor_units())
            });

        Money::from_minor(minor, self.currency)
    }

    /// Look up a part by id.
    pub fn get(&self, id: PartUuid) -> Option<&Part> {
        self.parts.iter().find(|part| part.id() == id)
    }

    /// Find the first part with the given code.
    pub fn find_by_code(&self, code: &str) -> Option<&Part> {
        let code = code.trim();

        self.parts.iter().find(|part| part.code() == code)
    }

    /// Iterate over the parts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    /// The parts as a slice.
    pub fn as_slice(&self) -> &[Part] {
        &self.parts
    }

    /// Get the number of parts in the buffer.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Get the currency parts are priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
