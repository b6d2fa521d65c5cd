use super::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use shared::{domain::Category, error::ErrorCode};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};
use uuid::Uuid;

#[derive(Clone, Default)]
struct ServerState {
    bodies: Arc<Mutex<Vec<Value>>>,
}

fn sample_contact() -> ClientContact {
    ClientContact {
        name: "Acme".to_string(),
        email: "a@acme.cl".to_string(),
        phone: "+56911111111".to_string(),
        enterprise_name: "Acme SpA".to_string(),
    }
}

async fn handle_create_contact(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.bodies.lock().await.push(body.clone());
    (
        StatusCode::CREATED,
        Json(json!({ "id": 41, "name": body["name"], "email": body["email"] })),
    )
}

async fn handle_update_contact(Path(id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "id": id + 1, "name": body["name"] }))
}

async fn handle_fetch_contact(Path(id): Path<i64>) -> Json<Value> {
    Json(json!({
        "id": id,
        "name": "Acme",
        "email": "a@acme.cl",
        "phone": "+56911111111",
        "enterpriseName": "Acme SpA"
    }))
}

async fn handle_fetch_quotation(Path(uuid): Path<Uuid>) -> Json<Value> {
    Json(json!({
        "uuid": uuid,
        "external_client": 41,
        "wells": [{
            "quotation": uuid,
            "name": "WELL-A",
            "granted_flow": 12.5,
            "well_depth": 40.0,
            "static_level": 5.0,
            "dynamic_level": 8.0,
            "pump_installation_depth": 20.0,
            "inside_diameter_well": 6.0,
            "duct_outside_diameter": 4.0,
            "has_flow_sensor": true,
            "exact_address": "Fundo El Roble",
            "type_captation": "B"
        }]
    }))
}

async fn handle_rejected_quotation() -> (StatusCode, String) {
    (
        StatusCode::BAD_REQUEST,
        "external_client: invalid pk".to_string(),
    )
}

async fn spawn_api_server() -> anyhow::Result<(String, ServerState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = ServerState::default();
    let app = Router::new()
        .route("/api/clients_external/", post(handle_create_contact))
        .route(
            "/api/clients_external/:id/",
            get(handle_fetch_contact).put(handle_update_contact),
        )
        .route("/api/quotation/", post(handle_rejected_quotation))
        .route("/api/quotation/:uuid/", get(handle_fetch_quotation))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/api"), state))
}

#[test]
fn base_url_gets_trailing_slash() {
    let url = normalize_base_url(" http://localhost:8000/api ").expect("url");
    assert_eq!(url.as_str(), "http://localhost:8000/api/");
    assert_eq!(
        url.join(CONTACTS_ROUTE).expect("join").as_str(),
        "http://localhost:8000/api/clients_external/"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    assert!(HttpQuotationApi::new("not a url").is_err());
}

#[tokio::test]
async fn create_contact_posts_contact_and_returns_server_id() {
    let (base_url, state) = spawn_api_server().await.expect("spawn server");
    let api = HttpQuotationApi::new(&base_url).expect("api");

    let contact_id = api
        .create_contact(&sample_contact())
        .await
        .expect("create contact");

    assert_eq!(contact_id, ContactId(41));
    let bodies = state.bodies.lock().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["enterpriseName"], "Acme SpA");
    assert_eq!(bodies[0]["phone"], "+56911111111");
}

#[tokio::test]
async fn rejected_request_surfaces_api_exception() {
    let (base_url, _state) = spawn_api_server().await.expect("spawn server");
    let api = HttpQuotationApi::new(&base_url).expect("api");

    let err = api
        .create_quotation(&CreateQuotationRequest {
            external_client: ContactId(41),
            is_external_client: true,
        })
        .await
        .expect_err("must fail");

    let exception = err.downcast_ref::<ApiException>().expect("api exception");
    assert_eq!(exception.code, ErrorCode::Validation);
    assert_eq!(exception.status, 400);
    assert!(exception.message.contains("invalid pk"));
}

#[tokio::test]
async fn update_contact_rejects_mismatched_id() {
    let (base_url, _state) = spawn_api_server().await.expect("spawn server");
    let api = HttpQuotationApi::new(&base_url).expect("api");

    let err = api
        .update_contact(ContactId(41), &sample_contact())
        .await
        .expect_err("mismatch");
    assert!(err.to_string().contains("while updating contact 41"));
}

#[tokio::test]
async fn fetch_quotation_decodes_stored_wells() {
    let (base_url, _state) = spawn_api_server().await.expect("spawn server");
    let api = HttpQuotationApi::new(&base_url).expect("api");
    let quotation_id = QuotationId(Uuid::from_u128(77));

    let detail = api.fetch_quotation(quotation_id).await.expect("fetch");
    assert_eq!(detail.uuid, Some(quotation_id));
    assert_eq!(detail.external_client, ContactId(41));
    assert_eq!(detail.wells.len(), 1);
    assert_eq!(detail.wells[0].type_captation, Category::B);

    let contact = api.fetch_contact(detail.external_client).await.expect("contact");
    assert_eq!(contact, sample_contact());
}

#[tokio::test]
async fn missing_backend_fails_every_call() {
    let api = MissingQuotationApi;
    assert!(api.create_contact(&sample_contact()).await.is_err());
    assert!(api.create_wells(&[]).await.is_err());
}
