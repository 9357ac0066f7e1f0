//! Scripts
//!
//! A script is a YAML list of steps replayed against a desk, the way a user
//! would click through the order form. Orders are addressed by number and
//! draft parts by code. A failing step is reported and the script carries on.
//!
//! ```yaml
//! steps:
//!   - open_form
//!   - fill_form:
//!       customer: { name: João Silva, phone: (11) 99999-9999 }
//!       equipment: { model: TC-300, serial_number: TC300-2023-001 }
//!       priority: alta
//!   - add_part: { code: DSP-001, name: Display, quantity: 1, unit_price: 250.00 }
//!   - submit
//!   - list
//! ```

use std::{fmt, fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    desk::{Command, DeskError, Outcome, ServiceDesk},
    orders::{Order, OrderFields, Status},
    parts::NewPart,
    render::{self, RenderError},
    sequence::OrderNumber,
};

/// Errors that stop a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script file could not be read.
    #[error("Failed to read script: {0}")]
    Io(#[from] io::Error),

    /// The script is not valid YAML or has an unknown step.
    #[error("Failed to parse script: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Output could not be written.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors that fail a single step.
#[derive(Debug, Error)]
pub enum StepError {
    /// The desk rejected the operation.
    #[error(transparent)]
    Desk(#[from] DeskError),

    /// No stored order has this number.
    #[error("no order numbered {0}")]
    UnknownOrder(OrderNumber),

    /// No draft part has this code.
    #[error("no part with code {0} in the draft")]
    UnknownPart(String),
}

/// A YAML scalar kept as the text a user would have typed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Whole number
    Integer(i64),

    /// Number with a fractional part
    Decimal(f64),

    /// Anything else
    Text(String),
}

impl Default for Scalar {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Add-part form fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PartStep {
    /// Part code
    pub code: String,

    /// Part name
    pub name: String,

    /// Quantity as typed
    pub quantity: Scalar,

    /// Unit price as typed
    pub unit_price: Scalar,
}

impl From<&PartStep> for NewPart {
    fn from(step: &PartStep) -> Self {
        NewPart::new(
            step.code.as_str(),
            step.name.as_str(),
            step.quantity.to_string(),
            step.unit_price.to_string(),
        )
    }
}

/// Delete an order, answering the confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteStep {
    /// Number of the order to delete
    pub number: OrderNumber,

    /// Answer to the confirmation prompt
    #[serde(default = "confirmed")]
    pub confirm: bool,
}

fn confirmed() -> bool {
    true
}

/// One user action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Open a blank order form.
    OpenForm,

    /// Replace the form fields.
    FillForm(OrderFields),

    /// Add a part to the draft.
    AddPart(PartStep),

    /// Remove the draft part with this code.
    RemovePart(String),

    /// Close the form without saving.
    CancelForm,

    /// Save the form as a pending order.
    Submit,

    /// Save the form as a draft.
    SaveDraft,

    /// Save the form with a specific status.
    Save(Status),

    /// Take the order with this number back into the form.
    Edit(OrderNumber),

    /// Delete an order.
    Delete(DeleteStep),

    /// Show an order's details.
    View(OrderNumber),

    /// List every order.
    List,

    /// List orders matching a term.
    Search(String),

    /// Show the draft parts.
    Parts,
}

/// Counts of applied and failed steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptReport {
    /// Steps that succeeded
    pub applied: usize,

    /// Steps that were rejected
    pub failed: usize,
}

/// A parsed script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    /// Load a script from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse a script from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed.
    pub fn from_yaml(contents: &str) -> Result<Self, ScriptError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// The steps, in order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Replay every step against `desk`, writing what happens to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing fails; rejected steps are counted in
    /// the report.
    pub fn run(
        &self,
        desk: &mut ServiceDesk,
        out: &mut impl io::Write,
    ) -> Result<ScriptReport, ScriptError> {
        let mut report = ScriptReport::default();

        for (index, step) in self.steps.iter().enumerate() {
            let position = index.saturating_add(1);

            debug!(step = position, ?step, "running step");

            match apply(step, desk, out)? {
                Ok(()) => report.applied = report.applied.saturating_add(1),
                Err(error) => {
                    warn!(step = position, %error, "step rejected");
                    writeln!(out, "Step {position} rejected: {error}").map_err(RenderError::from)?;

                    report.failed = report.failed.saturating_add(1);
                }
            }
        }

        Ok(report)
    }
}

fn apply(
    step: &Step,
    desk: &mut ServiceDesk,
    out: &mut impl io::Write,
) -> Result<Result<(), StepError>, RenderError> {
    if *step == Step::Parts {
        render::write_parts_table(out, desk.parts())?;

        return Ok(Ok(()));
    }

    let command = match to_command(step, desk) {
        Ok(command) => command,
        Err(error) => return Ok(Err(error)),
    };

    let answer = matches!(step, Step::Delete(DeleteStep { confirm: true, .. }));
    let mut confirmation = |_: &Order| answer;

    match desk.handle(command, &mut confirmation) {
        Ok(outcome) => {
            report(&outcome, desk, out)?;

            Ok(Ok(()))
        }
        Err(error) => Ok(Err(error.into())),
    }
}

fn to_command(step: &Step, desk: &ServiceDesk) -> Result<Command, StepError> {
    let order_id = |number: &OrderNumber| {
        desk.find_by_number(number)
            .map(Order::id)
            .ok_or_else(|| StepError::UnknownOrder(number.clone()))
    };

    let command = match step {
        Step::OpenForm => Command::OpenForm,
        Step::FillForm(fields) => Command::FillForm(fields.clone()),
        Step::AddPart(part) => Command::AddPart(NewPart::from(part)),
        Step::RemovePart(code) => {
            let part = desk
                .parts()
                .find_by_code(code)
                .ok_or_else(|| StepError::UnknownPart(code.clone()))?;

            Command::RemovePart(part.id())
        }
        Step::CancelForm => Command::CancelForm,
        Step::Submit => Command::Save(Status::Pending),
        Step::SaveDraft => Command::Save(Status::Draft),
        Step::Save(status) => Command::Save(*status),
        Step::Edit(number) => Command::StartEdit(order_id(number)?),
        Step::Delete(delete) => Command::Delete(order_id(&delete.number)?),
        Step::View(number) => Command::View(order_id(number)?),
        Step::List | Step::Parts => Command::Search(String::new()),
        Step::Search(term) => Command::Search(term.clone()),
    };

    Ok(command)
}

fn report(outcome: &Outcome, desk: &ServiceDesk, out: &mut impl io::Write) -> Result<(), RenderError> {
    match outcome {
        Outcome::FormOpened(number) => writeln!(out, "Order form opened: {number}")?,
        Outcome::FormFilled => writeln!(out, "Order form updated")?,
        Outcome::PartAdded(_) | Outcome::PartRemoved(Some(_)) => {
            writeln!(out, "Parts total: {}", desk.parts().total())?;
        }
        Outcome::PartRemoved(None) => writeln!(out, "Part not in the draft")?,
        Outcome::FormCancelled => writeln!(out, "Order form cancelled")?,
        Outcome::Saved(id) => {
            if let Some(order) = desk.order(*id) {
                writeln!(
                    out,
                    "Order saved: {} ({}, {})",
                    order.number(),
                    order.status(),
                    order.total()
                )?;
            }
        }
        Outcome::EditStarted(number) => writeln!(out, "Editing order {number}")?,
        Outcome::Deleted(Some(order)) => writeln!(out, "Order deleted: {}", order.number())?,
        Outcome::Deleted(None) => writeln!(out, "Delete cancelled")?,
        Outcome::Viewed(Some(details)) => writeln!(out, "{details}")?,
        Outcome::Viewed(None) => writeln!(out, "Order not found")?,
        Outcome::Found(rows) => render::write_order_table(out, rows)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::orders::Priority;

    use super::*;

    const LIFECYCLE: &str = r"
steps:
  - open_form
  - fill_form:
      customer: { name: João Silva, phone: (11) 99999-9999 }
      equipment: { model: TC-300, serial_number: TC300-2023-001 }
      priority: alta
  - submit
  - add_part: { code: DSP-001, name: Display LCD, quantity: 1, unit_price: 250.00 }
  - add_part: { code: FUS-001, name: Fuse, quantity: 2, unit_price: abc }
  - remove_part: FUS-001
  - submit
  - search: joão
";

    #[test]
    fn parses_every_step_shape() -> TestResult {
        let script = Script::from_yaml(
            "steps:\n  - open_form\n  - save: processing\n  - delete: { number: PED-001000, confirm: false }\n  - list\n  - parts\n",
        )?;

        assert_eq!(
            script.steps(),
            [
                Step::OpenForm,
                Step::Save(Status::Processing),
                Step::Delete(DeleteStep {
                    number: OrderNumber::from("PED-001000"),
                    confirm: false,
                }),
                Step::List,
                Step::Parts,
            ]
        );

        Ok(())
    }

    #[test]
    fn numbers_are_kept_as_typed_text() -> TestResult {
        let script = Script::from_yaml(
            "steps:\n  - add_part: { code: A, name: B, quantity: 3, unit_price: 15.5 }\n",
        )?;

        let [Step::AddPart(part)] = script.steps() else {
            return Err("expected a single add_part step".into());
        };

        let new_part = NewPart::from(part);

        assert_eq!(new_part.quantity, "3");
        assert_eq!(new_part.unit_price, "15.5");

        Ok(())
    }

    #[test]
    fn rejected_steps_are_counted_and_skipped() -> TestResult {
        let script = Script::from_yaml(LIFECYCLE)?;
        let mut desk = ServiceDesk::default();
        let mut out = Vec::new();

        let report = script.run(&mut desk, &mut out)?;
        let text = String::from_utf8(out)?;

        assert_eq!(report, ScriptReport { applied: 7, failed: 1 });
        assert!(text.contains("Step 3 rejected"), "{text}");
        assert!(text.contains("PED-001001"), "{text}");

        let order = desk
            .find_by_number(&OrderNumber::from("PED-001001"))
            .ok_or("order should be saved")?;

        assert_eq!(order.priority(), Priority::High);
        assert_eq!(order.parts().len(), 1);

        Ok(())
    }

    #[test]
    fn unknown_order_fails_the_step() -> TestResult {
        let script = Script::from_yaml("steps:\n  - view: PED-009999\n")?;
        let mut out = Vec::new();

        let report = script.run(&mut ServiceDesk::default(), &mut out)?;

        assert_eq!(report.failed, 1);
        assert!(String::from_utf8(out)?.contains("no order numbered PED-009999"));

        Ok(())
    }
}
