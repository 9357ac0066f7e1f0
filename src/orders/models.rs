//! Order Models

use jiff::{Timestamp, civil::Date};
use rusty_money::iso::Currency;
use serde::Deserialize;

use crate::{
    ids::TypedUuid,
    orders::status::{Priority, Status},
    parts::Part,
    pricing::{self, Amount},
    sequence::OrderNumber,
    validation::{OrderField, ValidationError, is_blank},
};

/// Customer name used when a draft is saved without one.
pub const UNNAMED_CUSTOMER: &str = "Customer not provided";

/// Order Id
pub type OrderUuid = TypedUuid<Order>;

/// Who the repair is for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Customer {
    /// Customer name
    pub name: String,

    /// Contact phone number
    pub phone: String,

    /// Contact e-mail
    pub email: String,
}

/// The device being repaired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Equipment {
    /// Model name
    pub model: String,

    /// Serial number
    pub serial_number: String,
}

/// Fields a user fills in on the order form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OrderFields {
    /// Order date; the form's date is used when absent
    pub date: Option<Date>,

    /// Customer details
    pub customer: Customer,

    /// Equipment details
    pub equipment: Equipment,

    /// Priority; required unless saving a draft
    pub priority: Option<Priority>,

    /// Free-text description of the problem
    pub description: String,
}

impl OrderFields {
    /// Check the fields every non-draft order needs, returning the priority.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for the first blank required field.
    pub fn require(&self) -> Result<Priority, ValidationError> {
        let required = [
            (&self.customer.name, OrderField::CustomerName),
            (&self.customer.phone, OrderField::CustomerPhone),
            (&self.equipment.model, OrderField::EquipmentModel),
            (&self.equipment.serial_number, OrderField::SerialNumber),
        ];

        if let Some((_, field)) = required.iter().find(|(value, _)| is_blank(value)) {
            return Err(ValidationError::MissingField(*field));
        }

        self.priority
            .ok_or(ValidationError::MissingField(OrderField::Priority))
    }

    /// Fill the blanks a draft is allowed to have, returning the priority.
    pub fn apply_draft_defaults(&mut self) -> Priority {
        if is_blank(&self.customer.name) {
            self.customer.name = UNNAMED_CUSTOMER.to_string();
        }

        *self.priority.get_or_insert_default()
    }
}

/// Everything needed to create an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Order number
    pub number: OrderNumber,

    /// Order date
    pub date: Date,

    /// Customer details
    pub customer: Customer,

    /// Equipment details
    pub equipment: Equipment,

    /// Priority
    pub priority: Priority,

    /// Problem description
    pub description: String,

    /// Parts, copied out of the draft buffer
    pub parts: Vec<Part>,

    /// Status
    pub status: Status,

    /// Creation time
    pub created_at: Timestamp,
}

impl NewOrder {
    /// Assign an id and freeze the total.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AmountOverflow`] if the parts' line totals
    /// do not fit in a single amount.
    pub fn into_order(self, currency: &'static Currency) -> Result<Order, ValidationError> {
        let total = pricing::checked_sum(self.parts.iter().map(Part::line_total), currency)
            .ok_or(ValidationError::AmountOverflow)?;

        Ok(Order {
            id: OrderUuid::now(),
            number: self.number,
            date: self.date,
            customer: self.customer,
            equipment: self.equipment,
            priority: self.priority,
            description: self.description,
            parts: self.parts,
            status: self.status,
            total,
            created_at: self.created_at,
        })
    }
}

/// A saved service order.
///
/// The total is fixed when the order is created; it is not recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: OrderUuid,
    number: OrderNumber,
    date: Date,
    customer: Customer,
    equipment: Equipment,
    priority: Priority,
    description: String,
    parts: Vec<Part>,
    status: Status,
    total: Amount,
    created_at: Timestamp,
}

impl Order {
    /// Order id
    pub fn id(&self) -> OrderUuid {
        self.id
    }

    /// Order number
    pub fn number(&self) -> &OrderNumber {
        &self.number
    }

    /// Order date
    pub fn date(&self) -> Date {
        self.date
    }

    /// Customer details
    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Equipment details
    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    /// Priority
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Problem description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Parts, in the order they were added
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Status
    pub fn status(&self) -> Status {
        self.status
    }

    /// Sum of the parts' line totals when the order was created
    pub fn total(&self) -> Amount {
        self.total
    }

    /// Creation time
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Break the order back into form fields and parts for editing.
    pub fn into_form(self) -> (OrderNumber, OrderFields, Vec<Part>) {
        let fields = OrderFields {
            date: Some(self.date),
            customer: self.customer,
            equipment: self.equipment,
            priority: Some(self.priority),
            description: self.description,
        };

        (self.number, fields, self.parts)
    }
}
