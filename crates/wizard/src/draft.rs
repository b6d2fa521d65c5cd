use serde::{Deserialize, Serialize};
use shared::domain::Category;

use crate::{
    error::{FieldViolation, ViolationKind},
    field::FieldStore,
    schema::{FieldKind, Schema},
};

/// Identity key comparison form: trimmed and uppercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralData {
    pub name: String,
    pub category: Category,
    #[serde(rename = "locationText")]
    pub location_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub path: String,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSlot {
    General,
    Detail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSlots {
    pub general: Option<FileRef>,
    pub detail: Option<FileRef>,
}

impl ImageSlots {
    pub fn set(&mut self, slot: ImageSlot, file: Option<FileRef>) {
        match slot {
            ImageSlot::General => self.general = file,
            ImageSlot::Detail => self.detail = file,
        }
    }

    pub fn get(&self, slot: ImageSlot) -> Option<&FileRef> {
        match slot {
            ImageSlot::General => self.general.as_ref(),
            ImageSlot::Detail => self.detail.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.general.is_none() && self.detail.is_none()
    }
}

/// One in-progress sub-entity. Committed snapshots share the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDraft {
    pub general_data: Option<GeneralData>,
    pub well_data: FieldStore,
    pub images: ImageSlots,
    pub is_edit: bool,
    pub is_load_image: bool,
    /// Already stored server-side under the session's quotation; the wells
    /// stage skips it.
    #[serde(default)]
    pub persisted: bool,
}

impl EntityDraft {
    pub fn empty(schema: &Schema) -> Self {
        Self {
            general_data: None,
            well_data: FieldStore::for_schema(schema),
            images: ImageSlots::default(),
            is_edit: false,
            is_load_image: false,
            persisted: false,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.general_data.as_ref().map(|general| general.name.as_str())
    }

    pub fn key(&self) -> String {
        normalize_name(self.name().unwrap_or_default())
    }

    /// Copy of a committed entity placed back in the draft slot for editing.
    pub fn for_edit(committed: &EntityDraft) -> Self {
        let mut draft = committed.clone();
        draft.well_data.reset_touched();
        draft.is_edit = true;
        draft.is_load_image = false;
        draft
    }

    /// Snapshot stored in the entity list; draft-slot flags are cleared.
    pub fn snapshot(&self) -> Self {
        let mut snapshot = self.clone();
        snapshot.is_edit = false;
        snapshot.is_load_image = false;
        snapshot
    }

    /// Walks `schema` in declaration order and returns the first failure.
    pub fn validate(&self, schema: &Schema) -> Result<(), FieldViolation> {
        let entity = self.name().unwrap_or_default().to_string();
        for spec in schema.fields {
            let value = self.well_data.get(spec.key);
            let kind = match spec.kind {
                FieldKind::Numeric { min, max } => {
                    match value.and_then(|value| value.number()) {
                        None => Some(ViolationKind::Missing),
                        Some(number) if number < min || number > max => {
                            Some(ViolationKind::OutOfRange {
                                value: number,
                                min,
                                max,
                            })
                        }
                        Some(_) => None,
                    }
                }
                FieldKind::Choice { options } => {
                    let selected = value.and_then(|value| value.text()).map(str::trim);
                    match selected {
                        Some(text)
                            if options
                                .iter()
                                .any(|option| option.eq_ignore_ascii_case(text)) =>
                        {
                            None
                        }
                        _ => Some(ViolationKind::NoSelection),
                    }
                }
            };

            if let Some(kind) = kind {
                return Err(FieldViolation {
                    entity,
                    entity_label: schema.entity_label,
                    field: spec.key,
                    label: spec.label,
                    kind,
                });
            }
        }
        Ok(())
    }
}
