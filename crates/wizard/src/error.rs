use std::fmt;

use thiserror::Error;

use crate::steps::Step;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViolationKind {
    Missing,
    OutOfRange { value: f64, min: f64, max: f64 },
    NoSelection,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Missing => write!(f, "es obligatorio"),
            ViolationKind::OutOfRange { value, min, max } => {
                write!(f, "debe estar entre {min} y {max} (valor: {value})")
            }
            ViolationKind::NoSelection => write!(f, "requiere una selección"),
        }
    }
}

/// The first field of a draft that fails the advance gate.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{label} del {entity_label} {entity} {kind}")]
pub struct FieldViolation {
    pub entity: String,
    pub entity_label: &'static str,
    pub field: &'static str,
    pub label: &'static str,
    pub kind: ViolationKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityListError {
    #[error("ya existe un registro con el nombre {name}")]
    Duplicate { name: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdvanceError {
    #[error("faltan los datos generales del registro")]
    MissingGeneralData,
    #[error(transparent)]
    InvalidField(#[from] FieldViolation),
    #[error(transparent)]
    Duplicate(#[from] EntityListError),
}

impl AdvanceError {
    pub fn violation(&self) -> Option<&FieldViolation> {
        match self {
            AdvanceError::InvalidField(violation) => Some(violation),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    #[error(transparent)]
    Advance(#[from] AdvanceError),
    #[error("unknown field {field}")]
    UnknownField { field: String },
    #[error("step {step:?} is hidden")]
    HiddenStep { step: Step },
    #[error("no committed entity to attach images to")]
    NoCommittedEntity,
    #[error("images cannot be changed while on step {step:?}")]
    ImagesUnavailable { step: Step },
}

impl WizardError {
    pub fn violation(&self) -> Option<&FieldViolation> {
        match self {
            WizardError::Advance(err) => err.violation(),
            _ => None,
        }
    }
}
