//! Sequential submission of one finalized wizard session.
//!
//! Stages run strictly in order and the first failure stops the run. Nothing
//! is rolled back: a contact or quotation created before the failure stays on
//! the server, and the report records exactly how far the run got.

use std::fmt;

use shared::{
    domain::{ClientContact, ContactId, QuotationId},
    protocol::CreateQuotationRequest,
};
use tracing::{error, info};
use wizard::EntityDraft;

use crate::{wells, QuotationApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Contact,
    Quotation,
    Wells,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Contact => "registrar el contacto",
            Stage::Quotation => "crear la cotización",
            Stage::Wells => "registrar los pozos",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    ContactCreated(ContactId),
    ContactUpdated(ContactId),
    QuotationCreated(QuotationId),
    QuotationReused(QuotationId),
    WellsCreated { count: usize },
    FailedAt { stage: Stage, cause: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionReport {
    pub outcomes: Vec<StageOutcome>,
}

impl SubmissionReport {
    pub fn is_complete(&self) -> bool {
        matches!(
            self.outcomes.last(),
            Some(StageOutcome::WellsCreated { .. })
        )
    }

    pub fn failed_stage(&self) -> Option<Stage> {
        self.outcomes.iter().find_map(|outcome| match outcome {
            StageOutcome::FailedAt { stage, .. } => Some(*stage),
            _ => None,
        })
    }

    pub fn contact_id(&self) -> Option<ContactId> {
        self.outcomes.iter().find_map(|outcome| match outcome {
            StageOutcome::ContactCreated(id) | StageOutcome::ContactUpdated(id) => Some(*id),
            _ => None,
        })
    }

    pub fn quotation_id(&self) -> Option<QuotationId> {
        self.outcomes.iter().find_map(|outcome| match outcome {
            StageOutcome::QuotationCreated(id) | StageOutcome::QuotationReused(id) => Some(*id),
            _ => None,
        })
    }

    fn fail(&mut self, stage: Stage, cause: anyhow::Error) {
        error!(?stage, error = %cause, "submission stage failed");
        self.outcomes.push(StageOutcome::FailedAt {
            stage,
            cause: format!("{cause:#}"),
        });
    }
}

/// Parent record attributes sent with the quotation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotationMeta {
    pub is_external_client: bool,
}

impl Default for QuotationMeta {
    fn default() -> Self {
        Self {
            is_external_client: true,
        }
    }
}

/// Runs contact → quotation → wells. A known `contact_id` turns the contact
/// stage into an update, a known `quotation_id` skips the quotation request,
/// and entities flagged `persisted` are left out of the wells request. When
/// nothing is pending the wells stage completes without a request.
pub async fn submit(
    api: &dyn QuotationApi,
    contact: &ClientContact,
    contact_id: Option<ContactId>,
    quotation_id: Option<QuotationId>,
    meta: QuotationMeta,
    entities: &[EntityDraft],
) -> SubmissionReport {
    let mut report = SubmissionReport::default();

    let contact_result = match contact_id {
        Some(id) => api
            .update_contact(id, contact)
            .await
            .map(|id| (id, StageOutcome::ContactUpdated(id))),
        None => api
            .create_contact(contact)
            .await
            .map(|id| (id, StageOutcome::ContactCreated(id))),
    };
    let contact_id = match contact_result {
        Ok((id, outcome)) => {
            report.outcomes.push(outcome);
            id
        }
        Err(err) => {
            report.fail(Stage::Contact, err);
            return report;
        }
    };

    let quotation_id = match quotation_id {
        Some(id) => {
            info!(quotation_id = %id, "reusing existing quotation");
            report.outcomes.push(StageOutcome::QuotationReused(id));
            id
        }
        None => {
            let request = CreateQuotationRequest {
                external_client: contact_id,
                is_external_client: meta.is_external_client,
            };
            match api.create_quotation(&request).await {
                Ok(id) => {
                    report.outcomes.push(StageOutcome::QuotationCreated(id));
                    id
                }
                Err(err) => {
                    report.fail(Stage::Quotation, err);
                    return report;
                }
            }
        }
    };

    let payloads = match entities
        .iter()
        .filter(|entity| !entity.persisted)
        .map(|entity| wells::to_payload(entity, quotation_id))
        .collect::<anyhow::Result<Vec<_>>>()
    {
        Ok(payloads) => payloads,
        Err(err) => {
            report.fail(Stage::Wells, err);
            return report;
        }
    };
    if payloads.is_empty() {
        info!(%quotation_id, "no pending wells to send");
        report.outcomes.push(StageOutcome::WellsCreated { count: 0 });
        return report;
    }
    match api.create_wells(&payloads).await {
        Ok(()) => {
            info!(%quotation_id, count = payloads.len(), "submission complete");
            report.outcomes.push(StageOutcome::WellsCreated {
                count: payloads.len(),
            });
        }
        Err(err) => report.fail(Stage::Wells, err),
    }
    report
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
