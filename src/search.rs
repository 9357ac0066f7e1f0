//! Search

use crate::orders::Order;

/// A normalised search term.
///
/// Matching is a case-insensitive substring test against the order number,
/// customer name, equipment model, status code and priority code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Trim and lowercase the raw input.
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// An empty term matches everything.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the order contains the term in one of its searchable fields.
    pub fn matches(&self, order: &Order) -> bool {
        if self.is_empty() {
            return true;
        }

        searchable_fields(order)
            .iter()
            .any(|field| field.to_lowercase().contains(&self.0))
    }
}

impl From<&str> for SearchTerm {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

fn searchable_fields(order: &Order) -> [&str; 5] {
    [
        order.number().as_str(),
        &order.customer().name,
        &order.equipment().model,
        order.status().as_str(),
        order.priority().as_str(),
    ]
}

/// Filter orders by `term`, preserving their order.
pub fn filter<'a>(
    orders: impl IntoIterator<Item = &'a Order>,
    term: &SearchTerm,
) -> Vec<&'a Order> {
    orders
        .into_iter()
        .filter(|order| term.matches(order))
        .collect()
}
