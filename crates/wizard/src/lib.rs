//! Reducer-driven wizard for collecting one client contact and a list of
//! sub-entities (wells), each validated against a declarative field schema.

pub mod action;
pub mod draft;
pub mod entity_list;
pub mod error;
pub mod field;
pub mod notification;
pub mod reducer;
pub mod schema;
pub mod steps;

pub use action::WizardAction;
pub use draft::{EntityDraft, FileRef, GeneralData, ImageSlot, ImageSlots};
pub use entity_list::EntityList;
pub use error::{AdvanceError, EntityListError, FieldViolation, ViolationKind, WizardError};
pub use field::{FieldScalar, FieldStore, FieldValue};
pub use notification::{Notification, NotificationLevel};
pub use reducer::{Wizard, WizardState};
pub use schema::{FieldKind, FieldSpec, Schema, WELL_SCHEMA};
pub use steps::{Step, StepDescriptor, WizardSteps};
