use serde::{Deserialize, Serialize};
use shared::domain::{ClientContact, ContactId, QuotationId};

use crate::{
    draft::{EntityDraft, FileRef, GeneralData, ImageSlot},
    field::FieldScalar,
    notification::Notification,
    steps::Step,
};

/// Everything a host view can ask the wizard to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum WizardAction {
    SubmitContact {
        contact: ClientContact,
    },
    ContactPersisted {
        contact_id: ContactId,
    },
    QuotationCreated {
        quotation_id: QuotationId,
    },
    WellsPersisted,
    SubmitGeneralData {
        general: GeneralData,
    },
    SetField {
        field: String,
        #[serde(default)]
        value: Option<FieldScalar>,
        #[serde(default = "default_touched")]
        touched: bool,
    },
    TryAdvance,
    OpenImages,
    CloseImages,
    AttachImage {
        slot: ImageSlot,
        file: FileRef,
    },
    RemoveImage {
        slot: ImageSlot,
    },
    FinishImages,
    AddAnother,
    EditEntity {
        name: String,
    },
    DeleteEntity {
        name: String,
    },
    Cancel,
    SetCurrent {
        step: Step,
    },
    Notify {
        notification: Notification,
    },
    LoadQuotation {
        quotation_id: QuotationId,
        contact_id: ContactId,
        contact: ClientContact,
        entities: Vec<EntityDraft>,
    },
    Reset,
}

fn default_touched() -> bool {
    true
}

impl WizardAction {
    pub fn name(&self) -> &'static str {
        match self {
            WizardAction::SubmitContact { .. } => "submit_contact",
            WizardAction::ContactPersisted { .. } => "contact_persisted",
            WizardAction::QuotationCreated { .. } => "quotation_created",
            WizardAction::WellsPersisted => "wells_persisted",
            WizardAction::SubmitGeneralData { .. } => "submit_general_data",
            WizardAction::SetField { .. } => "set_field",
            WizardAction::TryAdvance => "try_advance",
            WizardAction::OpenImages => "open_images",
            WizardAction::CloseImages => "close_images",
            WizardAction::AttachImage { .. } => "attach_image",
            WizardAction::RemoveImage { .. } => "remove_image",
            WizardAction::FinishImages => "finish_images",
            WizardAction::AddAnother => "add_another",
            WizardAction::EditEntity { .. } => "edit_entity",
            WizardAction::DeleteEntity { .. } => "delete_entity",
            WizardAction::Cancel => "cancel",
            WizardAction::SetCurrent { .. } => "set_current",
            WizardAction::Notify { .. } => "notify",
            WizardAction::LoadQuotation { .. } => "load_quotation",
            WizardAction::Reset => "reset",
        }
    }
}
