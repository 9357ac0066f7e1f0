//! Orders

pub mod models;
pub mod status;

pub use models::{Customer, Equipment, NewOrder, Order, OrderFields, OrderUuid};
pub use status::{Priority, Status, UnknownCode};
