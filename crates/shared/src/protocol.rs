use serde::{Deserialize, Serialize};

use crate::domain::{Category, ClientContact, ContactId, QuotationId};

pub const CONTACTS_ROUTE: &str = "clients_external/";
pub const QUOTATIONS_ROUTE: &str = "quotation/";
pub const WELLS_ROUTE: &str = "wells/";

pub fn contact_route(contact_id: ContactId) -> String {
    format!("{CONTACTS_ROUTE}{contact_id}/")
}

pub fn quotation_route(quotation_id: QuotationId) -> String {
    format!("{QUOTATIONS_ROUTE}{quotation_id}/")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "enterpriseName")]
    pub enterprise_name: String,
}

impl From<&ClientContact> for ContactRequest {
    fn from(contact: &ClientContact) -> Self {
        Self {
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            enterprise_name: contact.enterprise_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub id: ContactId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(rename = "enterpriseName", default)]
    pub enterprise_name: String,
}

impl ContactResponse {
    pub fn into_contact(self) -> (ContactId, ClientContact) {
        (
            self.id,
            ClientContact {
                name: self.name,
                email: self.email,
                phone: self.phone,
                enterprise_name: self.enterprise_name,
            },
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuotationRequest {
    pub external_client: ContactId,
    pub is_external_client: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotationResponse {
    pub uuid: QuotationId,
}

/// One well as accepted by the bulk wells endpoint and echoed by the
/// quotation detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellPayload {
    pub quotation: QuotationId,
    pub name: String,
    pub granted_flow: f64,
    pub well_depth: f64,
    pub static_level: f64,
    pub dynamic_level: f64,
    pub pump_installation_depth: f64,
    pub inside_diameter_well: f64,
    pub duct_outside_diameter: f64,
    pub has_flow_sensor: bool,
    pub exact_address: String,
    pub type_captation: Category,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotationDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<QuotationId>,
    pub external_client: ContactId,
    #[serde(default)]
    pub wells: Vec<WellPayload>,
}
