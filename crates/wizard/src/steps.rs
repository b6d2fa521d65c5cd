use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    ContactEntry,
    EntityDataEntry,
    ImageOrReview,
    FinalReview,
    EditingImages,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::ContactEntry,
        Step::EntityDataEntry,
        Step::ImageOrReview,
        Step::FinalReview,
        Step::EditingImages,
    ];

    pub fn index(self) -> usize {
        match self {
            Step::ContactEntry => 0,
            Step::EntityDataEntry => 1,
            Step::ImageOrReview => 2,
            Step::FinalReview => 3,
            Step::EditingImages => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::ContactEntry => "Datos de contacto",
            Step::EntityDataEntry => "Datos del pozo",
            Step::ImageOrReview => "Imágenes",
            Step::FinalReview => "Resumen",
            Step::EditingImages => "Cargar imágenes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDescriptor {
    pub title: &'static str,
    pub finished: bool,
    pub active: bool,
    pub hidden: bool,
}

/// Fixed sequence of step descriptors plus the current position.
///
/// Moves are explicit; nothing here checks whether a move is a sensible one
/// for the flow, only that the target step is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSteps {
    descriptors: [StepDescriptor; 5],
    current: Step,
}

impl Default for WizardSteps {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSteps {
    pub fn new() -> Self {
        let descriptors = Step::ALL.map(|step| StepDescriptor {
            title: step.title(),
            finished: false,
            active: step == Step::ContactEntry,
            hidden: step == Step::EditingImages,
        });
        Self {
            descriptors,
            current: Step::ContactEntry,
        }
    }

    pub fn current(&self) -> Step {
        self.current
    }

    pub fn current_index(&self) -> usize {
        self.current.index()
    }

    pub fn descriptor(&self, step: Step) -> &StepDescriptor {
        &self.descriptors[step.index()]
    }

    pub fn descriptors(&self) -> &[StepDescriptor] {
        &self.descriptors
    }

    /// Moves to `step` unless it is hidden. Returns whether the move happened.
    pub fn set_current(&mut self, step: Step) -> bool {
        if self.descriptors[step.index()].hidden {
            debug!(?step, "ignored move to hidden step");
            return false;
        }
        self.descriptors[self.current.index()].active = false;
        self.descriptors[step.index()].active = true;
        debug!(from = ?self.current, to = ?step, "wizard step changed");
        self.current = step;
        true
    }

    pub fn mark_finished(&mut self, step: Step) {
        self.descriptors[step.index()].finished = true;
    }

    pub fn reveal(&mut self, step: Step) {
        self.descriptors[step.index()].hidden = false;
    }

    /// Hides `step`. The current step is never hidden.
    pub fn hide(&mut self, step: Step) -> bool {
        if step == self.current {
            return false;
        }
        self.descriptors[step.index()].hidden = true;
        true
    }
}
