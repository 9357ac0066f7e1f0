//! Order Store

use crate::{
    orders::{Order, OrderUuid},
    search::{self, SearchTerm},
    sequence::OrderNumber,
};

/// Saved orders, newest first.
#[derive(Debug, Clone, Default)]
pub struct OrderStore {
    orders: Vec<Order>,
}

impl OrderStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an order at the front of the store.
    pub fn insert(&mut self, order: Order) {
        self.orders.insert(0, order);
    }

    /// Append orders after the existing ones, keeping their given order.
    pub fn extend(&mut self, orders: impl IntoIterator<Item = Order>) {
        self.orders.extend(orders);
    }

    /// Remove and return the order with the given id.
    pub fn remove(&mut self, id: OrderUuid) -> Option<Order> {
        let position = self.orders.iter().position(|order| order.id() == id)?;

        Some(self.orders.remove(position))
    }

    /// Look up an order by id.
    pub fn get(&self, id: OrderUuid) -> Option<&Order> {
        self.orders.iter().find(|order| order.id() == id)
    }

    /// Look up an order by its number.
    pub fn find_by_number(&self, number: &OrderNumber) -> Option<&Order> {
        self.orders.iter().find(|order| order.number() == number)
    }

    /// Orders matching `term`, in store order.
    ///
    /// An empty term returns every order.
    pub fn search(&self, term: &str) -> Vec<&Order> {
        search::filter(&self.orders, &SearchTerm::new(term))
    }

    /// Iterate over the orders, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// The orders as a slice, newest first.
    pub fn as_slice(&self) -> &[Order] {
        &self.orders
    }

    /// Get the number of orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
