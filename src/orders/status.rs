//! Order status and priority

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// A status or priority code that is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownCode {
    kind: &'static str,
    value: String,
}

/// Where an order is in the repair workflow.
///
/// The usual path is `Draft → Pending → Processing → Completed`, with
/// `Cancelled` reachable from any non-terminal status. Transitions are not
/// enforced: the status is whatever the user saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Status {
    /// Saved without validation, may have no parts
    Draft,

    /// Submitted and waiting for work to start
    Pending,

    /// Repair in progress
    Processing,

    /// Repair finished
    Completed,

    /// Abandoned
    Cancelled,
}

impl Status {
    /// Every status, in workflow order.
    pub const ALL: [Status; 5] = [
        Status::Draft,
        Status::Pending,
        Status::Processing,
        Status::Completed,
        Status::Cancelled,
    ];

    /// Lowercase code, as matched by search.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Pending => "pending",
            Status::Processing => "processing",
            Status::Completed => "completed",
            Status::Cancelled => "cancelled",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Status::Draft => "Draft",
            Status::Pending => "Pending",
            Status::Processing => "Processing",
            Status::Completed => "Completed",
            Status::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" | "rascunho" => Ok(Status::Draft),
            "pending" | "pendente" => Ok(Status::Pending),
            "processing" | "processando" => Ok(Status::Processing),
            "completed" | "concluido" | "concluído" => Ok(Status::Completed),
            "cancelled" | "canceled" | "cancelado" => Ok(Status::Cancelled),
            _ => Err(UnknownCode {
                kind: "status",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Status {
    type Error = UnknownCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// How urgently the repair is needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Priority {
    /// Low
    #[default]
    Low,

    /// Medium
    Medium,

    /// High
    High,

    /// Urgent
    Urgent,
}

impl Priority {
    /// Lowercase code, as matched by search.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Portuguese codes come from the order sheets the sample data was taken from.
        match s.trim().to_lowercase().as_str() {
            "low" | "baixa" => Ok(Priority::Low),
            "medium" | "media" | "média" => Ok(Priority::Medium),
            "high" | "alta" => Ok(Priority::High),
            "urgent" | "urgente" => Ok(Priority::Urgent),
            _ => Err(UnknownCode {
                kind: "priority",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = UnknownCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
