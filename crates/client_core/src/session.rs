use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use shared::domain::QuotationId;
use tracing::{info, warn};
use wizard::{
    Notification, Schema, Wizard, WizardAction, WizardError, WizardState,
};

use crate::{
    pipeline::{self, QuotationMeta, StageOutcome, SubmissionReport},
    wells, QuotationApi,
};

/// Host-side navigation performed once a submission fully succeeds.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

#[derive(Debug, Clone)]
pub struct SubmitOptions {
    pub redirect_url: String,
    pub redirect_delay: Duration,
    pub meta: QuotationMeta,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            redirect_url: "/quotations/".to_string(),
            redirect_delay: Duration::from_secs(5),
            meta: QuotationMeta::default(),
        }
    }
}

/// One wizard state tree bound to the collaborators its submit step needs.
pub struct WizardSession {
    wizard: Wizard,
    api: Arc<dyn QuotationApi>,
    navigator: Arc<dyn Navigator>,
    options: SubmitOptions,
}

impl WizardSession {
    pub fn new(
        schema: &'static Schema,
        api: Arc<dyn QuotationApi>,
        navigator: Arc<dyn Navigator>,
        options: SubmitOptions,
    ) -> Self {
        Self {
            wizard: Wizard::new(schema),
            api,
            navigator,
            options,
        }
    }

    pub fn state(&self) -> &WizardState {
        self.wizard.state()
    }

    pub fn dispatch(&mut self, action: WizardAction) -> Result<(), WizardError> {
        self.wizard.dispatch(action)
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.wizard.take_notifications()
    }

    fn apply(&mut self, action: WizardAction) {
        let name = action.name();
        if let Err(err) = self.wizard.dispatch(action) {
            warn!(action = name, error = %err, "session action rejected");
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.apply(WizardAction::Notify { notification });
    }

    /// Runs the submission pipeline over the current state, records every
    /// stage outcome as a notification and redirects after a full success.
    pub async fn submit(&mut self) -> SubmissionReport {
        let state = self.wizard.state();
        let Some(contact) = state.contact.clone() else {
            self.notify(Notification::warning("Ingrese los datos de contacto"));
            return SubmissionReport::default();
        };
        if state.entities.is_empty() {
            self.notify(Notification::warning("Ingrese al menos un pozo"));
            return SubmissionReport::default();
        }
        let contact_id = state.contact_id;
        let quotation_id = state.quotation_id;
        let entities = state.entities.entries().to_vec();

        let report = pipeline::submit(
            self.api.as_ref(),
            &contact,
            contact_id,
            quotation_id,
            self.options.meta,
            &entities,
        )
        .await;

        for outcome in &report.outcomes {
            match outcome {
                StageOutcome::ContactCreated(id) | StageOutcome::ContactUpdated(id) => {
                    self.apply(WizardAction::ContactPersisted { contact_id: *id });
                    self.notify(Notification::success("Contacto registrado"));
                }
                StageOutcome::QuotationCreated(id) => {
                    self.apply(WizardAction::QuotationCreated { quotation_id: *id });
                    self.notify(Notification::success("Cotización creada"));
                }
                StageOutcome::QuotationReused(id) => {
                    self.notify(Notification::info(format!("Cotización {id} actualizada")));
                }
                StageOutcome::WellsCreated { count } => {
                    self.apply(WizardAction::WellsPersisted);
                    self.notify(Notification::success(format!(
                        "Cotización enviada con {count} pozos nuevos"
                    )));
                }
                StageOutcome::FailedAt { stage, cause } => {
                    self.notify(Notification::error(format!("Error al {stage}: {cause}")));
                }
            }
        }

        if report.is_complete() {
            tokio::time::sleep(self.options.redirect_delay).await;
            info!(url = %self.options.redirect_url, "redirecting after submission");
            self.navigator.navigate(&self.options.redirect_url);
        }
        report
    }

    /// Loads a stored quotation back into the wizard, landing on final review.
    pub async fn resume(&mut self, quotation_id: QuotationId) -> Result<()> {
        let loaded = self.load_quotation(quotation_id).await;
        if let Err(err) = &loaded {
            self.notify(Notification::error(format!(
                "No fue posible cargar la cotización: {err:#}"
            )));
        }
        loaded
    }

    async fn load_quotation(&mut self, quotation_id: QuotationId) -> Result<()> {
        let detail = self
            .api
            .fetch_quotation(quotation_id)
            .await
            .with_context(|| format!("failed to load quotation {quotation_id}"))?;
        let contact = self
            .api
            .fetch_contact(detail.external_client)
            .await
            .with_context(|| format!("failed to load contact {}", detail.external_client))?;
        let schema = self.wizard.schema();
        let entities = detail
            .wells
            .iter()
            .map(|well| wells::from_payload(schema, well))
            .collect();

        self.apply(WizardAction::LoadQuotation {
            quotation_id,
            contact_id: detail.external_client,
            contact,
            entities,
        });
        Ok(())
    }
}
