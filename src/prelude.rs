//! Repair Desk prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    desk::{ActiveForm, Command, Confirmation, DeskError, DeskSettings, Outcome, ServiceDesk},
    details::{OrderDetails, OrderRow, Snapshot},
    fixtures::{Fixture, FixtureError},
    orders::{Customer, Equipment, Order, OrderFields, OrderUuid, Priority, Status},
    parts::{NewPart, Part, PartUuid, PartsBuffer},
    pricing::Amount,
    script::{Script, ScriptError, ScriptReport},
    sequence::OrderNumber,
    validation::{OrderField, ValidationError},
};
