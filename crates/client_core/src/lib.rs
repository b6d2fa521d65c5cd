use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{ClientContact, ContactId, QuotationId},
    error::ApiException,
    protocol::{
        contact_route, quotation_route, ContactRequest, ContactResponse, CreateQuotationRequest,
        QuotationDetail, QuotationResponse, WellPayload, CONTACTS_ROUTE, QUOTATIONS_ROUTE,
        WELLS_ROUTE,
    },
};
use tracing::{debug, info};
use url::Url;

pub mod pipeline;
pub mod session;
pub mod wells;

pub use pipeline::{submit, QuotationMeta, Stage, StageOutcome, SubmissionReport};
pub use session::{Navigator, SubmitOptions, WizardSession};

/// The REST collaborator the wizard hands finalized data to.
#[async_trait]
pub trait QuotationApi: Send + Sync {
    async fn create_contact(&self, contact: &ClientContact) -> Result<ContactId>;
    async fn update_contact(
        &self,
        contact_id: ContactId,
        contact: &ClientContact,
    ) -> Result<ContactId>;
    async fn fetch_contact(&self, contact_id: ContactId) -> Result<ClientContact>;
    async fn create_quotation(&self, request: &CreateQuotationRequest) -> Result<QuotationId>;
    async fn create_wells(&self, wells: &[WellPayload]) -> Result<()>;
    async fn fetch_quotation(&self, quotation_id: QuotationId) -> Result<QuotationDetail>;
}

pub struct MissingQuotationApi;

#[async_trait]
impl QuotationApi for MissingQuotationApi {
    async fn create_contact(&self, _contact: &ClientContact) -> Result<ContactId> {
        Err(anyhow!("quotation backend is unavailable"))
    }

    async fn update_contact(
        &self,
        contact_id: ContactId,
        _contact: &ClientContact,
    ) -> Result<ContactId> {
        Err(anyhow!(
            "quotation backend is unavailable for contact {contact_id}"
        ))
    }

    async fn fetch_contact(&self, contact_id: ContactId) -> Result<ClientContact> {
        Err(anyhow!(
            "quotation backend is unavailable for contact {contact_id}"
        ))
    }

    async fn create_quotation(&self, _request: &CreateQuotationRequest) -> Result<QuotationId> {
        Err(anyhow!("quotation backend is unavailable"))
    }

    async fn create_wells(&self, _wells: &[WellPayload]) -> Result<()> {
        Err(anyhow!("quotation backend is unavailable"))
    }

    async fn fetch_quotation(&self, quotation_id: QuotationId) -> Result<QuotationDetail> {
        Err(anyhow!(
            "quotation backend is unavailable for quotation {quotation_id}"
        ))
    }
}

/// Ensures a trailing slash so relative joins keep the base path.
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&with_slash).with_context(|| format!("invalid api base url '{raw}'"))
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiException::from_status(status.as_u16(), body).into())
}

pub struct HttpQuotationApi {
    http: Client,
    base_url: Url,
}

impl HttpQuotationApi {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: Client::new(),
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, route: &str) -> Result<Url> {
        self.base_url
            .join(route)
            .with_context(|| format!("invalid endpoint route '{route}'"))
    }
}

#[async_trait]
impl QuotationApi for HttpQuotationApi {
    async fn create_contact(&self, contact: &ClientContact) -> Result<ContactId> {
        let url = self.endpoint(CONTACTS_ROUTE)?;
        debug!(%url, "creating external contact");
        let response = self
            .http
            .post(url)
            .json(&ContactRequest::from(contact))
            .send()
            .await
            .context("failed to send contact request")?;
        let body: ContactResponse = ensure_success(response).await?.json().await?;
        info!(contact_id = %body.id, "external contact created");
        Ok(body.id)
    }

    async fn update_contact(
        &self,
        contact_id: ContactId,
        contact: &ClientContact,
    ) -> Result<ContactId> {
        let url = self.endpoint(&contact_route(contact_id))?;
        debug!(%url, "updating external contact");
        let response = self
            .http
            .put(url)
            .json(&ContactRequest::from(contact))
            .send()
            .await
            .context("failed to send contact update")?;
        let body: ContactResponse = ensure_success(response).await?.json().await?;
        if body.id != contact_id {
            return Err(anyhow!(
                "server returned contact {} while updating contact {contact_id}",
                body.id
            ));
        }
        info!(%contact_id, "external contact updated");
        Ok(body.id)
    }

    async fn fetch_contact(&self, contact_id: ContactId) -> Result<ClientContact> {
        let url = self.endpoint(&contact_route(contact_id))?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("failed to fetch contact")?;
        let body: ContactResponse = ensure_success(response).await?.json().await?;
        Ok(body.into_contact().1)
    }

    async fn create_quotation(&self, request: &CreateQuotationRequest) -> Result<QuotationId> {
        let url = self.endpoint(QUOTATIONS_ROUTE)?;
        debug!(%url, contact_id = %request.external_client, "creating quotation");
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .context("failed to send quotation request")?;
        let body: QuotationResponse = ensure_success(response).await?.json().await?;
        info!(quotation_id = %body.uuid, "quotation created");
        Ok(body.uuid)
    }

    async fn create_wells(&self, wells: &[WellPayload]) -> Result<()> {
        let url = self.endpoint(WELLS_ROUTE)?;
        debug!(%url, count = wells.len(), "creating wells");
        let response = self
            .http
            .post(url)
            .json(wells)
            .send()
            .await
            .context("failed to send wells request")?;
        ensure_success(response).await?;
        info!(count = wells.len(), "wells created");
        Ok(())
    }

    async fn fetch_quotation(&self, quotation_id: QuotationId) -> Result<QuotationDetail> {
        let url = self.endpoint(&quotation_route(quotation_id))?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("failed to fetch quotation")?;
        let detail = ensure_success(response).await?.json().await?;
        Ok(detail)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
