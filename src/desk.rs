//! Service desk
//!
//! The composition root. [`ServiceDesk`] owns the order store, the draft parts
//! buffer, the open order form and the number sequence, and exposes every
//! operation a front end may invoke, either as methods or as [`Command`]s.

use jiff::{Timestamp, Zoned, civil::Date};
use rusty_money::iso::{self, Currency};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    details::{OrderDetails, OrderRow, Snapshot},
    orders::{NewOrder, Order, OrderFields, OrderUuid, Status},
    parts::{NewPart, Part, PartUuid, PartsBuffer},
    search::SearchTerm,
    sequence::{DEFAULT_PREFIX, DEFAULT_SEED, OrderNumber, OrderSequence},
    store::OrderStore,
    validation::ValidationError,
};

/// Errors returned by desk operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeskError {
    /// The user input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No order has the given id.
    #[error("order not found")]
    NotFound,
}

/// Settings a desk is created with.
#[derive(Debug, Clone)]
pub struct DeskSettings {
    /// Currency every amount is priced in
    pub currency: &'static Currency,

    /// Prefix of generated order numbers
    pub sequence_prefix: String,

    /// First sequence value
    pub sequence_seed: u64,
}

impl Default for DeskSettings {
    fn default() -> Self {
        Self {
            currency: iso::BRL,
            sequence_prefix: DEFAULT_PREFIX.to_string(),
            sequence_seed: DEFAULT_SEED,
        }
    }
}

/// The order form currently being filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveForm {
    number: OrderNumber,
    date: Date,
    fields: OrderFields,
    editing: bool,
}

impl ActiveForm {
    /// Number the order will be saved under
    pub fn number(&self) -> &OrderNumber {
        &self.number
    }

    /// Date the form was opened, or the edited order's date
    pub fn date(&self) -> Date {
        self.fields.date.unwrap_or(self.date)
    }

    /// Current field values
    pub fn fields(&self) -> &OrderFields {
        &self.fields
    }

    /// Whether the form holds an order taken out of the store for editing
    pub fn is_edit(&self) -> bool {
        self.editing
    }
}

/// Asks the user to confirm a destructive action.
#[cfg_attr(test, mockall::automock)]
pub trait Confirmation {
    /// Return true if `order` should be deleted.
    fn confirm_delete(&mut self, order: &Order) -> bool;
}

impl<F> Confirmation for F
where
    F: FnMut(&Order) -> bool,
{
    fn confirm_delete(&mut self, order: &Order) -> bool {
        self(order)
    }
}

/// A named operation invoked by a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a blank order form, consuming a sequence number.
    OpenForm,

    /// Replace the open form's fields.
    FillForm(OrderFields),

    /// Add a part to the draft buffer.
    AddPart(NewPart),

    /// Remove a part from the draft buffer.
    RemovePart(PartUuid),

    /// Close the form and discard the draft buffer.
    CancelForm,

    /// Save the open form with the given status.
    Save(Status),

    /// Move an order out of the store into the form.
    StartEdit(OrderUuid),

    /// Delete an order after confirmation.
    Delete(OrderUuid),

    /// Render one order's details.
    View(OrderUuid),

    /// List orders matching a term.
    Search(String),
}

/// What a [`Command`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A form was opened with this number.
    FormOpened(OrderNumber),

    /// The form fields were replaced.
    FormFilled,

    /// A part was added.
    PartAdded(PartUuid),

    /// The removed part, if the id was in the buffer.
    PartRemoved(Option<Part>),

    /// The form was closed without saving.
    FormCancelled,

    /// An order was saved.
    Saved(OrderUuid),

    /// An order was moved into the form.
    EditStarted(OrderNumber),

    /// The deleted order, or `None` when the user declined.
    Deleted(Option<Order>),

    /// Rendered order details, or `None` when the id is unknown.
    Viewed(Option<String>),

    /// Listing rows for the matching orders.
    Found(Vec<OrderRow>),
}

/// Owns all order state for one session.
#[derive(Debug, Clone)]
pub struct ServiceDesk {
    store: OrderStore,
    parts: PartsBuffer,
    form: Option<ActiveForm>,
    sequence: OrderSequence,
    currency: &'static Currency,
}

impl ServiceDesk {
    /// Create an empty desk.
    pub fn new(settings: DeskSettings) -> Self {
        Self {
            store: OrderStore::new(),
            parts: PartsBuffer::new(settings.currency),
            form: None,
            sequence: OrderSequence::new(settings.sequence_prefix, settings.sequence_seed),
            currency: settings.currency,
        }
    }

    /// Append existing orders after the ones already stored and move the
    /// sequence forward to `next_sequence`.
    pub fn import(&mut self, orders: impl IntoIterator<Item = Order>, next_sequence: u64) {
        let before = self.store.len();

        self.store.extend(orders);
        self.sequence.advance_to(next_sequence);

        info!(
            imported = self.store.len() - before,
            next = %self.sequence.peek(),
            "orders imported"
        );
    }

    /// Open a blank form dated today.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::FormAlreadyOpen`]: a form is already open.
    /// - [`ValidationError::SequenceExhausted`]: no order number is left.
    pub fn open_form(&mut self) -> Result<&ActiveForm, ValidationError> {
        if self.form.is_some() {
            return Err(ValidationError::FormAlreadyOpen);
        }

        let number = self.sequence.issue()?;

        info!(%number, "order form opened");

        self.parts.reset();

        Ok(self.form.insert(ActiveForm {
            number,
            date: today(),
            fields: OrderFields::default(),
            editing: false,
        }))
    }

    /// Replace the open form's fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoActiveForm`] if no form is open.
    pub fn fill_form(&mut self, fields: OrderFields) -> Result<(), ValidationError> {
        self.form_mut()?.fields = fields;

        Ok(())
    }

    /// Add a part to the draft buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoActiveForm`] if no form is open, or the
    /// buffer's validation error if the part is rejected.
    pub fn add_part(&mut self, new_part: NewPart) -> Result<PartUuid, ValidationError> {
        self.form_mut()?;

        self.parts
            .add(new_part)
            .inspect_err(|error| warn!(%error, "part rejected"))
    }

    /// Remove a part from the draft buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoActiveForm`] if no form is open.
    pub fn remove_part(&mut self, id: PartUuid) -> Result<Option<Part>, ValidationError> {
        self.form_mut()?;

        Ok(self.parts.remove(id))
    }

    /// Close the form and empty the draft buffer.
    ///
    /// Cancelling an edit loses the edited order for good.
    pub fn cancel_form(&mut self) {
        if let Some(form) = self.form.take() {
            if form.editing {
                warn!(number = %form.number, "edit abandoned, order discarded");
            } else {
                info!(number = %form.number, "order form cancelled");
            }
        }

        self.parts.reset();
    }

    /// Save the open form as a new order at the front of the store.
    ///
    /// Drafts need nothing filled in; blanks get defaults. Every other status
    /// needs the required fields, and `Pending` also needs at least one part.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if no form is open or the form is
    /// incomplete; the form and buffer are left as they were.
    pub fn save(&mut self, status: Status) -> Result<OrderUuid, ValidationError> {
        self.build_order(status)
            .inspect_err(|error| warn!(%error, status = status.as_str(), "order rejected"))
            .map(|order| {
                let id = order.id();

                info!(
                    number = %order.number(),
                    status = status.as_str(),
                    total = %order.total(),
                    "order saved"
                );

                self.store.insert(order);
                self.form = None;
                self.parts.reset();

                id
            })
    }

    /// Save the open form as a pending order.
    ///
    /// # Errors
    ///
    /// See [`ServiceDesk::save`].
    pub fn submit(&mut self) -> Result<OrderUuid, ValidationError> {
        self.save(Status::Pending)
    }

    /// Save the open form as a draft.
    ///
    /// # Errors
    ///
    /// See [`ServiceDesk::save`].
    pub fn save_draft(&mut self) -> Result<OrderUuid, ValidationError> {
        self.save(Status::Draft)
    }

    fn build_order(&self, status: Status) -> Result<Order, ValidationError> {
        let form = self.form.as_ref().ok_or(ValidationError::NoActiveForm)?;
        let mut fields = form.fields.clone();

        let priority = if status == Status::Draft {
            fields.apply_draft_defaults()
        } else {
            fields.require()?
        };

        if status == Status::Pending && self.parts.is_empty() {
            return Err(ValidationError::NoParts);
        }

        NewOrder {
            number: form.number.clone(),
            date: fields.date.unwrap_or(form.date),
            customer: fields.customer,
            equipment: fields.equipment,
            priority,
            description: fields.description,
            parts: self.parts.as_slice().to_vec(),
            status,
            created_at: Timestamp::now(),
        }
        .into_order(self.currency)
    }

    /// Move an order out of the store and into the form for editing.
    ///
    /// The order leaves the store immediately and only comes back when the
    /// form is saved again. Opening the form issues a new number, so the
    /// re-saved order is numbered afresh and an abandoned edit burns one.
    ///
    /// # Errors
    ///
    /// - [`DeskError::Validation`]: a form is already open, or no order
    ///   number is left. The order stays in the store.
    /// - [`DeskError::NotFound`]: no order has this id.
    pub fn start_edit(&mut self, id: OrderUuid) -> Result<&ActiveForm, DeskError> {
        if self.form.is_some() {
            return Err(ValidationError::FormAlreadyOpen.into());
        }

        if self.store.get(id).is_none() {
            return Err(DeskError::NotFound);
        }

        let number = self.sequence.issue().map_err(ValidationError::from)?;
        let order = self.store.remove(id).ok_or(DeskError::NotFound)?;
        let (previous, fields, parts) = order.into_form();

        info!(%previous, %number, parts = parts.len(), "order taken out for editing");

        self.parts.replace(parts);

        Ok(self.form.insert(ActiveForm {
            number,
            date: fields.date.unwrap_or_else(today),
            fields,
            editing: true,
        }))
    }

    /// Delete an order if `confirmation` agrees.
    ///
    /// Returns the deleted order, or `None` when the user declined.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::NotFound`] if no order has this id; the user is
    /// not asked in that case.
    pub fn delete(
        &mut self,
        id: OrderUuid,
        confirmation: &mut (impl Confirmation + ?Sized),
    ) -> Result<Option<Order>, DeskError> {
        let order = self.store.get(id).ok_or(DeskError::NotFound)?;

        if !confirmation.confirm_delete(order) {
            info!(number = %order.number(), "delete declined");

            return Ok(None);
        }

        let removed = self.store.remove(id);

        if let Some(order) = &removed {
            info!(number = %order.number(), "order deleted");
        }

        Ok(removed)
    }

    /// Read-only details of one order, or `None` for an unknown id.
    pub fn read(&self, id: OrderUuid) -> Option<OrderDetails<'_>> {
        self.store.get(id).map(OrderDetails::new)
    }

    /// Orders matching `term`, in store order; everything for an empty term.
    pub fn search(&self, term: &str) -> Vec<&Order> {
        self.store.search(term)
    }

    /// Listing rows for the orders matching `term`.
    pub fn rows(&self, term: &str) -> Vec<OrderRow> {
        let term = SearchTerm::new(term);

        self.store
            .iter()
            .filter(|order| term.matches(order))
            .map(OrderRow::from)
            .collect()
    }

    /// Borrowed view of the store and the draft buffer.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            orders: self.store.as_slice(),
            parts: self.parts.as_slice(),
        }
    }

    /// Dispatch a [`Command`].
    ///
    /// # Errors
    ///
    /// Returns whatever error the underlying operation returns.
    pub fn handle(
        &mut self,
        command: Command,
        confirmation: &mut dyn Confirmation,
    ) -> Result<Outcome, DeskError> {
        let outcome = match command {
            Command::OpenForm => Outcome::FormOpened(self.open_form()?.number().clone()),
            Command::FillForm(fields) => {
                self.fill_form(fields)?;
                Outcome::FormFilled
            }
            Command::AddPart(new_part) => Outcome::PartAdded(self.add_part(new_part)?),
            Command::RemovePart(id) => Outcome::PartRemoved(self.remove_part(id)?),
            Command::CancelForm => {
                self.cancel_form();
                Outcome::FormCancelled
            }
            Command::Save(status) => Outcome::Saved(self.save(status)?),
            Command::StartEdit(id) => Outcome::EditStarted(self.start_edit(id)?.number().clone()),
            Command::Delete(id) => Outcome::Deleted(self.delete(id, confirmation)?),
            Command::View(id) => {
                Outcome::Viewed(self.read(id).map(|details| details.to_string()))
            }
            Command::Search(term) => Outcome::Found(self.rows(&term)),
        };

        Ok(outcome)
    }

    /// Look up an order by id.
    pub fn order(&self, id: OrderUuid) -> Option<&Order> {
        self.store.get(id)
    }

    /// Look up an order by its number.
    pub fn find_by_number(&self, number: &OrderNumber) -> Option<&Order> {
        self.store.find_by_number(number)
    }

    /// Saved orders
    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    /// Draft parts buffer
    pub fn parts(&self) -> &PartsBuffer {
        &self.parts
    }

    /// The open form, if any
    pub fn form(&self) -> Option<&ActiveForm> {
        self.form.as_ref()
    }

    /// The number the next opened form will get
    pub fn next_number(&self) -> OrderNumber {
        self.sequence.peek()
    }

    /// Currency every amount is priced in
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn form_mut(&mut self) -> Result<&mut ActiveForm, ValidationError> {
        self.form.as_mut().ok_or(ValidationError::NoActiveForm)
    }
}

impl Default for ServiceDesk {
    fn default() -> Self {
        Self::new(DeskSettings::default())
    }
}

fn today() -> Date {
    Zoned::now().date()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::Money;
    use testresult::TestResult;

    use crate::{
        orders::{Customer, Equipment, Priority},
        sequence::SequenceExhausted,
        validation::OrderField,
    };

    use super::*;

    fn complete_fields() -> OrderFields {
        OrderFields {
            date: None,
            customer: Customer {
                name: "João Silva".to_string(),
                phone: "(11) 99999-9999".to_string(),
                email: "joao@email.com".to_string(),
            },
            equipment: Equipment {
                model: "TC-300".to_string(),
                serial_number: "TC300-2023-001".to_string(),
            },
            priority: Some(Priority::High),
            description: "Display flickers".to_string(),
        }
    }

    fn never_asked() -> MockConfirmation {
        let mut confirmation = MockConfirmation::new();
        confirmation.expect_confirm_delete().never();
        confirmation
    }

    fn saved_order(desk: &mut ServiceDesk) -> TestResult<OrderUuid> {
        desk.open_form()?;
        desk.fill_form(complete_fields())?;
        desk.add_part(NewPart::new("DSP-001", "Display LCD 7\"", "1", "250.00"))?;

        Ok(desk.submit()?)
    }

    #[test]
    fn open_form_issues_sequential_numbers() -> TestResult {
        let mut desk = ServiceDesk::default();

        let first = desk.open_form()?.number().clone();
        desk.cancel_form();
        let second = desk.open_form()?.number().clone();

        assert_eq!(first.as_str(), "PED-001001");
        assert_eq!(second.as_str(), "PED-001002");
        assert_eq!(desk.next_number().as_str(), "PED-001003");

        Ok(())
    }

    #[test]
    fn only_one_form_at_a_time() -> TestResult {
        let mut desk = ServiceDesk::default();

        desk.open_form()?;

        assert_eq!(desk.open_form().err(), Some(ValidationError::FormAlreadyOpen));

        Ok(())
    }

    #[test]
    fn parts_need_an_open_form() {
        let mut desk = ServiceDesk::default();

        let result = desk.add_part(NewPart::new("A", "B", "1", "1.00"));

        assert_eq!(result.err(), Some(ValidationError::NoActiveForm));
        assert!(desk.parts().is_empty());
    }

    #[test]
    fn submit_saves_at_the_front_and_resets_the_form() -> TestResult {
        let mut desk = ServiceDesk::default();
        let first = saved_order(&mut desk)?;
        let second = saved_order(&mut desk)?;

        let numbers: Vec<&str> = desk
            .store()
            .iter()
            .map(|order| order.number().as_str())
            .collect();

        assert_eq!(numbers, ["PED-001002", "PED-001001"]);
        assert!(desk.form().is_none());
        assert!(desk.parts().is_empty());

        let order = desk.order(first).ok_or("first order should be stored")?;
        assert_eq!(order.status(), Status::Pending);
        assert_eq!(order.total(), Money::from_minor(250_00, iso::BRL));
        assert_eq!(order.parts().len(), 1);
        assert!(desk.order(second).is_some());

        Ok(())
    }

    #[test]
    fn submit_without_parts_is_rejected_and_keeps_the_form() -> TestResult {
        let mut desk = ServiceDesk::default();
        desk.open_form()?;
        desk.fill_form(complete_fields())?;

        assert_eq!(desk.submit().err(), Some(ValidationError::NoParts));
        assert!(desk.store().is_empty());
        assert!(desk.form().is_some());

        Ok(())
    }

    #[test]
    fn submit_requires_the_mandatory_fields() -> TestResult {
        let mut desk = ServiceDesk::default();
        desk.open_form()?;
        desk.add_part(NewPart::new("A", "Fuse", "1", "3.00"))?;

        let mut fields = complete_fields();
        fields.equipment.serial_number = "  ".to_string();
        desk.fill_form(fields)?;

        assert_eq!(
            desk.submit().err(),
            Some(ValidationError::MissingField(OrderField::SerialNumber))
        );

        let mut fields = complete_fields();
        fields.priority = None;
        desk.fill_form(fields)?;

        assert_eq!(
            desk.submit().err(),
            Some(ValidationError::MissingField(OrderField::Priority))
        );
        assert_eq!(desk.parts().len(), 1);

        Ok(())
    }

    #[test]
    fn empty_draft_gets_defaults() -> TestResult {
        let mut desk = ServiceDesk::default();
        desk.open_form()?;

        let id = desk.save_draft()?;
        let order = desk.order(id).ok_or("draft should be stored")?;

        assert_eq!(order.status(), Status::Draft);
        assert_eq!(order.customer().name, "Customer not provided");
        assert_eq!(order.priority(), Priority::Low);
        assert!(order.parts().is_empty());
        assert_eq!(order.total(), Money::from_minor(0, iso::BRL));

        Ok(())
    }

    #[test]
    fn other_statuses_may_be_saved_without_parts() -> TestResult {
        let mut desk = ServiceDesk::default();
        desk.open_form()?;
        desk.fill_form(complete_fields())?;

        let id = desk.save(Status::Completed)?;

        assert_eq!(desk.order(id).map(Order::status), Some(Status::Completed));

        Ok(())
    }

    #[test]
    fn form_date_is_used_when_none_is_given() -> TestResult {
        let mut desk = ServiceDesk::default();
        let opened = desk.open_form()?.date();
        let id = desk.save_draft()?;

        assert_eq!(desk.order(id).map(Order::date), Some(opened));

        desk.open_form()?;
        desk.fill_form(OrderFields {
            date: Some(date(2024, 3, 9)),
            ..OrderFields::default()
        })?;
        let id = desk.save_draft()?;

        assert_eq!(desk.order(id).map(Order::date), Some(date(2024, 3, 9)));

        Ok(())
    }

    #[test]
    fn cancel_discards_the_buffer() -> TestResult {
        let mut desk = ServiceDesk::default();
        desk.open_form()?;
        desk.add_part(NewPart::new("A", "Fuse", "2", "3.00"))?;

        desk.cancel_form();

        assert!(desk.form().is_none());
        assert!(desk.parts().is_empty());
        assert!(desk.store().is_empty());

        Ok(())
    }

    #[test]
    fn start_edit_moves_the_order_into_the_form() -> TestResult {
        let mut desk = ServiceDesk::default();
        let id = saved_order(&mut desk)?;

        let form = desk.start_edit(id)?;

        assert!(form.is_edit());
        assert_eq!(form.number().as_str(), "PED-001002");
        assert_eq!(form.fields().customer.name, "João Silva");
        assert!(desk.store().is_empty());
        assert_eq!(desk.parts().len(), 1);
        assert_eq!(desk.parts().total(), Money::from_minor(250_00, iso::BRL));

        Ok(())
    }

    #[test]
    fn saving_an_edit_takes_a_fresh_number() -> TestResult {
        let mut desk = ServiceDesk::default();
        let id = saved_order(&mut desk)?;

        desk.start_edit(id)?;
        desk.add_part(NewPart::new("FUS-001", "Fuse", "2", "1.50"))?;
        let edited = desk.submit()?;

        let order = desk.order(edited).ok_or("edited order should be stored")?;

        assert_eq!(order.number().as_str(), "PED-001002");
        assert_eq!(order.total(), Money::from_minor(253_00, iso::BRL));
        assert_eq!(desk.store().len(), 1);
        assert_eq!(desk.next_number().as_str(), "PED-001003");

        Ok(())
    }

    #[test]
    fn cancelled_edit_loses_the_order() -> TestResult {
        let mut desk = ServiceDesk::default();
        let id = saved_order(&mut desk)?;

        desk.start_edit(id)?;
        desk.cancel_form();

        assert!(desk.store().is_empty());
        assert!(desk.order(id).is_none());
        assert_eq!(desk.next_number().as_str(), "PED-001003");

        Ok(())
    }

    #[test]
    fn start_edit_checks_form_and_id() -> TestResult {
        let mut desk = ServiceDesk::default();
        let id = saved_order(&mut desk)?;

        assert_eq!(
            desk.start_edit(OrderUuid::now()).err(),
            Some(DeskError::NotFound)
        );
        assert_eq!(desk.next_number().as_str(), "PED-001002");

        desk.open_form()?;

        assert_eq!(
            desk.start_edit(id).err(),
            Some(DeskError::Validation(ValidationError::FormAlreadyOpen))
        );
        assert_eq!(desk.store().len(), 1);

        Ok(())
    }

    #[test]
    fn delete_removes_after_confirmation() -> TestResult {
        let mut desk = ServiceDesk::default();
        let id = saved_order(&mut desk)?;

        let mut confirmation = MockConfirmation::new();
        confirmation
            .expect_confirm_delete()
            .withf(move |order| order.id() == id)
            .times(1)
            .return_const(true);

        let deleted = desk.delete(id, &mut confirmation)?;

        assert_eq!(deleted.map(|order| order.id()), Some(id));
        assert!(desk.store().is_empty());

        Ok(())
    }

    #[test]
    fn declined_delete_keeps_the_order() -> TestResult {
        let mut desk = ServiceDesk::default();
        let id = saved_order(&mut desk)?;

        let deleted = desk.delete(id, &mut |_: &Order| false)?;

        assert!(deleted.is_none());
        assert_eq!(desk.store().len(), 1);

        Ok(())
    }

    #[test]
    fn delete_of_unknown_id_does_not_ask() {
        let mut desk = ServiceDesk::default();

        let result = desk.delete(OrderUuid::now(), &mut never_asked());

        assert_eq!(result.err(), Some(DeskError::NotFound));
    }

    #[test]
    fn read_is_none_for_unknown_ids() -> TestResult {
        let mut desk = ServiceDesk::default();
        let id = saved_order(&mut desk)?;

        assert!(desk.read(OrderUuid::now()).is_none());

        let details = desk.read(id).ok_or("order should be readable")?;
        assert!(details.to_string().starts_with("ORDER: PED-001001"));

        Ok(())
    }

    #[test]
    fn commands_drive_the_whole_lifecycle() -> TestResult {
        let mut desk = ServiceDesk::default();
        let mut confirmation = never_asked();

        let opened = desk.handle(Command::OpenForm, &mut confirmation)?;
        assert_eq!(opened, Outcome::FormOpened(OrderNumber::from("PED-001001")));

        desk.handle(Command::FillForm(complete_fields()), &mut confirmation)?;
        let Outcome::PartAdded(part) = desk.handle(
            Command::AddPart(NewPart::new("X", "Spare", "1", "9.90")),
            &mut confirmation,
        )?
        else {
            return Err("expected a part id".into());
        };

        let removed = desk.handle(Command::RemovePart(part), &mut confirmation)?;
        assert!(matches!(removed, Outcome::PartRemoved(Some(_))));

        let rejected = desk.handle(Command::Save(Status::Pending), &mut confirmation);
        assert_eq!(
            rejected.err(),
            Some(DeskError::Validation(ValidationError::NoParts))
        );

        desk.handle(
            Command::AddPart(NewPart::new("DSP-001", "Display", "1", "250.00")),
            &mut confirmation,
        )?;
        let Outcome::Saved(id) = desk.handle(Command::Save(Status::Pending), &mut confirmation)?
        else {
            return Err("expected a saved order".into());
        };

        let Outcome::Found(rows) = desk.handle(Command::Search("joão".into()), &mut confirmation)?
        else {
            return Err("expected search rows".into());
        };
        assert_eq!(rows.len(), 1);

        let Outcome::Viewed(Some(text)) = desk.handle(Command::View(id), &mut confirmation)? else {
            return Err("expected order details".into());
        };
        assert!(text.contains("TC-300"));

        Ok(())
    }

    #[test]
    fn import_appends_and_advances_the_sequence() -> TestResult {
        let mut source = ServiceDesk::default();
        saved_order(&mut source)?;

        let mut desk = ServiceDesk::default();
        desk.import(source.store().as_slice().to_vec(), 1_500);

        assert_eq!(desk.store().len(), 1);
        assert_eq!(desk.next_number().as_str(), "PED-001500");

        desk.import(Vec::new(), 10);

        assert_eq!(desk.next_number().as_str(), "PED-001500");

        Ok(())
    }

    #[test]
    fn exhausted_sequence_refuses_new_forms_and_keeps_orders() -> TestResult {
        let mut source = ServiceDesk::default();
        let id = saved_order(&mut source)?;

        let mut desk = ServiceDesk::default();
        desk.import(source.store().as_slice().to_vec(), u64::MAX);

        desk.open_form()?;
        desk.cancel_form();

        assert_eq!(
            desk.open_form().err(),
            Some(ValidationError::SequenceExhausted(SequenceExhausted))
        );
        assert_eq!(
            desk.start_edit(id).err(),
            Some(DeskError::Validation(ValidationError::SequenceExhausted(
                SequenceExhausted
            )))
        );
        assert_eq!(desk.store().len(), 1);
        assert!(desk.form().is_none());

        Ok(())
    }
}
