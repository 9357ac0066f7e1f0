//! Repair Desk
//!
//! Repair Desk keeps the service orders of an equipment repair shop: an order
//! form with a draft parts list, validated saves, newest-first storage,
//! case-insensitive search and per-order detail views.

pub mod config;
pub mod desk;
pub mod details;
pub mod fixtures;
pub mod ids;
pub mod observability;
pub mod orders;
pub mod parts;
pub mod prelude;
pub mod pricing;
pub mod render;
pub mod script;
pub mod search;
pub mod sequence;
pub mod store;
pub mod validation;
