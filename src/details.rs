//! Read projections
//!
//! Display-ready views of orders for whatever front end is listing them.

use std::fmt;

use jiff::civil::Date;

use crate::{orders::Order, parts::Part, validation::is_blank};

const NOT_PROVIDED: &str = "Not provided";

/// Format a date the way order sheets show it (`dd/mm/yyyy`).
pub fn format_date(date: Date) -> String {
    date.strftime("%d/%m/%Y").to_string()
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if is_blank(value) {
        placeholder
    } else {
        value
    }
}

/// Borrowed view of both collections, for renderers.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Saved orders, newest first
    pub orders: &'a [Order],

    /// Parts in the draft buffer
    pub parts: &'a [Part],
}

/// One line of the order listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    /// Order number
    pub number: String,

    /// Formatted order date
    pub date: String,

    /// Customer name
    pub customer: String,

    /// Customer phone, may be empty
    pub phone: String,

    /// Equipment model, `-` when blank
    pub equipment: String,

    /// Status label
    pub status: &'static str,

    /// Priority label
    pub priority: &'static str,

    /// Formatted order total
    pub total: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            number: order.number().to_string(),
            date: format_date(order.date()),
            customer: order.customer().name.clone(),
            phone: order.customer().phone.clone(),
            equipment: or_placeholder(&order.equipment().model, "-").to_string(),
            status: order.status().label(),
            priority: order.priority().label(),
            total: order.total().to_string(),
        }
    }
}

/// Read-only details of a single order.
///
/// The [`Display`](fmt::Display) implementation renders the full details
/// block: header, customer, equipment, description, parts and total.
#[derive(Debug, Clone, Copy)]
pub struct OrderDetails<'a> {
    order: &'a Order,
}

impl<'a> OrderDetails<'a> {
    /// Project an order.
    pub fn new(order: &'a Order) -> Self {
        Self { order }
    }

    /// The order being shown.
    pub fn order(&self) -> &'a Order {
        self.order
    }
}

impl fmt::Display for OrderDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = self.order;
        let customer = order.customer();
        let equipment = order.equipment();

        writeln!(f, "ORDER: {}", order.number())?;
        writeln!(f, "DATE: {}", format_date(order.date()))?;
        writeln!(f, "STATUS: {}", order.status())?;
        writeln!(f, "PRIORITY: {}", order.priority())?;

        writeln!(f)?;
        writeln!(f, "CUSTOMER:")?;
        writeln!(f, "Name: {}", customer.name)?;
        writeln!(f, "Phone: {}", or_placeholder(&customer.phone, NOT_PROVIDED))?;
        writeln!(f, "E-mail: {}", or_placeholder(&customer.email, NOT_PROVIDED))?;

        writeln!(f)?;
        writeln!(f, "EQUIPMENT:")?;
        writeln!(f, "Model: {}", or_placeholder(&equipment.model, NOT_PROVIDED))?;
        writeln!(
            f,
            "Serial: {}",
            or_placeholder(&equipment.serial_number, NOT_PROVIDED)
        )?;

        writeln!(f)?;
        writeln!(f, "DESCRIPTION:")?;
        writeln!(
            f,
            "{}",
            or_placeholder(order.description(), "No description provided")
        )?;

        writeln!(f)?;
        writeln!(f, "PARTS:")?;

        if order.parts().is_empty() {
            writeln!(f, "No parts added")?;
        }

        for part in order.parts() {
            writeln!(
                f,
                "• {} ({}) - Qty: {} - {}",
                part.name(),
                part.code(),
                part.quantity(),
                part.unit_price()
            )?;
        }

        writeln!(f)?;
        write!(f, "TOTAL: {}", order.total())
    }
}
