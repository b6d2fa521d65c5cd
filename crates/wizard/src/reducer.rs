//! Action reducer for the quotation wizard.
//!
//! One [`Wizard`] owns one isolated state tree. The host view drives it only
//! through [`Wizard::dispatch`]; the reducer performs no I/O and every call
//! runs to completion before the next one.

use shared::domain::{ClientContact, ContactId, QuotationId};
use tracing::{debug, info, warn};

use crate::{
    action::WizardAction,
    draft::{EntityDraft, FileRef, ImageSlot},
    entity_list::EntityList,
    error::{AdvanceError, WizardError},
    field::FieldScalar,
    notification::Notification,
    schema::Schema,
    steps::{Step, WizardSteps},
};

#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub contact: Option<ClientContact>,
    pub contact_id: Option<ContactId>,
    pub quotation_id: Option<QuotationId>,
    pub draft: EntityDraft,
    pub entities: EntityList,
    pub steps: WizardSteps,
    pub last_committed: Option<String>,
    pub notifications: Vec<Notification>,
}

impl WizardState {
    pub fn new(schema: &Schema) -> Self {
        Self {
            contact: None,
            contact_id: None,
            quotation_id: None,
            draft: EntityDraft::empty(schema),
            entities: EntityList::new(),
            steps: WizardSteps::new(),
            last_committed: None,
            notifications: Vec::new(),
        }
    }

    pub fn current_step(&self) -> Step {
        self.steps.current()
    }
}

pub struct Wizard {
    schema: &'static Schema,
    state: WizardState,
}

impl Wizard {
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            state: WizardState::new(schema),
        }
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.state.notifications)
    }

    pub fn dispatch(&mut self, action: WizardAction) -> Result<(), WizardError> {
        debug!(action = action.name(), step = ?self.state.current_step(), "dispatch");
        match action {
            WizardAction::SubmitContact { contact } => {
                self.state.contact = Some(contact);
                self.state.steps.mark_finished(Step::ContactEntry);
                self.state.steps.set_current(Step::EntityDataEntry);
            }
            WizardAction::ContactPersisted { contact_id } => {
                self.state.contact_id = Some(contact_id);
            }
            WizardAction::QuotationCreated { quotation_id } => {
                self.state.quotation_id = Some(quotation_id);
            }
            WizardAction::WellsPersisted => {
                let marked = self.state.entities.mark_persisted();
                debug!(marked, "entities marked as stored");
            }
            WizardAction::SubmitGeneralData { general } => {
                self.state.draft.general_data = Some(general);
            }
            WizardAction::SetField {
                field,
                value,
                touched,
            } => self.set_field(&field, value.as_ref(), touched)?,
            WizardAction::TryAdvance => {
                self.try_advance()?;
            }
            WizardAction::OpenImages => {
                self.state.draft.is_load_image = true;
                self.state.steps.reveal(Step::EditingImages);
                self.state.steps.set_current(Step::EditingImages);
            }
            WizardAction::CloseImages => {
                self.state.draft.is_load_image = false;
                self.state.steps.set_current(Step::EntityDataEntry);
                self.state.steps.hide(Step::EditingImages);
            }
            WizardAction::AttachImage { slot, file } => self.set_image(slot, Some(file))?,
            WizardAction::RemoveImage { slot } => self.set_image(slot, None)?,
            WizardAction::FinishImages => {
                self.state.steps.mark_finished(Step::ImageOrReview);
                self.state.steps.set_current(Step::FinalReview);
            }
            WizardAction::AddAnother => {
                self.state.draft = EntityDraft::empty(self.schema);
                self.state.steps.set_current(Step::EntityDataEntry);
            }
            WizardAction::EditEntity { name } => match self.state.entities.select_for_edit(&name) {
                Some(draft) => {
                    self.state.draft = draft;
                    self.state.steps.set_current(Step::EntityDataEntry);
                }
                None => debug!(%name, "edit requested for unknown entity"),
            },
            WizardAction::DeleteEntity { name } => {
                self.state.entities.delete(&name);
                if self
                    .state
                    .last_committed
                    .as_deref()
                    .is_some_and(|last| !self.state.entities.contains(last))
                {
                    self.state.last_committed = None;
                }
            }
            WizardAction::Cancel => self.cancel(),
            WizardAction::SetCurrent { step } => {
                if !self.state.steps.set_current(step) {
                    return Err(WizardError::HiddenStep { step });
                }
            }
            WizardAction::Notify { notification } => {
                self.state.notifications.push(notification);
            }
            WizardAction::LoadQuotation {
                quotation_id,
                contact_id,
                contact,
                entities,
            } => self.load_quotation(quotation_id, contact_id, contact, entities),
            WizardAction::Reset => {
                self.state = WizardState::new(self.schema);
            }
        }
        Ok(())
    }

    fn set_field(
        &mut self,
        field: &str,
        value: Option<&FieldScalar>,
        touched: bool,
    ) -> Result<(), WizardError> {
        let Some(spec) = self.schema.field(field) else {
            warn!(field, "set_field for a field outside the schema");
            return Err(WizardError::UnknownField {
                field: field.to_string(),
            });
        };
        self.state.draft.well_data.set_field(spec, value, touched);
        Ok(())
    }

    /// Step-advance gate: validates the draft, commits it and moves to the
    /// image step. Stops at the first failing field.
    pub fn try_advance(&mut self) -> Result<Step, AdvanceError> {
        let result = self.commit_draft();
        if let Err(err) = &result {
            let notification = match err {
                AdvanceError::Duplicate(_) => Notification::warning(err.to_string()),
                _ => Notification::error(err.to_string()),
            };
            warn!(error = %err, "draft rejected");
            self.state.notifications.push(notification);
        }
        result
    }

    fn commit_draft(&mut self) -> Result<Step, AdvanceError> {
        let draft = &self.state.draft;
        let name = draft
            .name()
            .ok_or(AdvanceError::MissingGeneralData)?
            .to_string();
        draft.validate(self.schema)?;

        let snapshot = draft.snapshot();
        if draft.is_edit {
            self.state.entities.update(snapshot);
        } else {
            self.state.entities.add(snapshot)?;
        }
        info!(%name, edit = draft.is_edit, total = self.state.entities.len(), "entity committed");

        self.state.last_committed = Some(name);
        self.state.draft = EntityDraft::empty(self.schema);
        self.state.steps.mark_finished(Step::EntityDataEntry);
        self.state.steps.set_current(Step::ImageOrReview);
        self.state.steps.hide(Step::EditingImages);
        self.state
            .notifications
            .push(Notification::info(self.state.entities.summary()));
        Ok(Step::ImageOrReview)
    }

    fn set_image(&mut self, slot: ImageSlot, file: Option<FileRef>) -> Result<(), WizardError> {
        match self.state.current_step() {
            Step::EntityDataEntry | Step::EditingImages => {
                self.state.draft.images.set(slot, file);
                return Ok(());
            }
            Step::ImageOrReview => {}
            step => {
                warn!(?step, ?slot, "image change outside the image steps");
                return Err(WizardError::ImagesUnavailable { step });
            }
        }

        let committed = self
            .state
            .last_committed
            .as_deref()
            .and_then(|name| self.state.entities.find(name))
            .cloned();
        let Some(mut entity) = committed else {
            return Err(WizardError::NoCommittedEntity);
        };
        entity.images.set(slot, file);
        self.state.entities.update(entity);
        Ok(())
    }

    fn cancel(&mut self) {
        let step = self.state.current_step();
        if !matches!(step, Step::EntityDataEntry | Step::EditingImages) {
            return;
        }
        if self.state.entities.is_empty() {
            debug!("cancel ignored with no committed entities");
            return;
        }
        self.state.draft = EntityDraft::empty(self.schema);
        self.state.steps.set_current(Step::FinalReview);
        self.state.steps.hide(Step::EditingImages);
    }

    fn load_quotation(
        &mut self,
        quotation_id: QuotationId,
        contact_id: ContactId,
        contact: ClientContact,
        entities: Vec<EntityDraft>,
    ) {
        let mut state = WizardState::new(self.schema);
        state.contact = Some(contact);
        state.contact_id = Some(contact_id);
        state.quotation_id = Some(quotation_id);
        for entity in entities {
            if let Err(err) = state.entities.add(entity.snapshot()) {
                warn!(%err, "skipped well from stored quotation");
            }
        }
        state.last_committed = state
            .entities
            .entries()
            .last()
            .and_then(|entity| entity.name().map(str::to_string));
        for step in [Step::ContactEntry, Step::EntityDataEntry, Step::ImageOrReview] {
            state.steps.mark_finished(step);
        }
        state.steps.set_current(Step::FinalReview);
        info!(%quotation_id, wells = state.entities.len(), "quotation loaded into wizard");
        self.state = state;
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
