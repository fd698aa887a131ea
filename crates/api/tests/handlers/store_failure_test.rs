use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use barberbook_api::{ApiState, app};
use barberbook_core::{
    errors::BookingError,
    ledger::{self, SLOT_TAKEN},
    models::{appointment::CreateAppointmentRequest, service::Service},
    store::MockBookingStore,
};
use serde_json::Value;
use uuid::Uuid;

use crate::test_utils::error_message;

#[tokio::test]
async fn test_store_outage_is_a_server_error() {
    let mut store = MockBookingStore::new();
    store
        .expect_list_services()
        .returning(|| Err(BookingError::Database(eyre::eyre!("connection refused"))));

    let server = TestServer::new(app(Arc::new(ApiState::new(Arc::new(store))))).unwrap();
    let response = server.get("/api/services").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(&response).starts_with("Database error"));
}

#[tokio::test]
async fn test_health_does_not_touch_the_store() {
    let server =
        TestServer::new(app(Arc::new(ApiState::new(Arc::new(MockBookingStore::new()))))).unwrap();

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");

    let version = server.get("/version").await;
    version.assert_status_ok();
    let body = version.json::<Value>();
    assert_eq!(body["service"], "barberbook-api");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_slot_lost_to_concurrent_booking_is_a_conflict() {
    let service = Service {
        id: Uuid::new_v4(),
        name: "Haircut".to_string(),
        duration: 30,
        price: 30.0,
    };
    let service_id = service.id;

    let mut store = MockBookingStore::new();
    store
        .expect_find_service()
        .returning(move |_| Ok(Some(service.clone())));
    store.expect_find_client_by_phone().returning(|_| Ok(None));
    store.expect_find_client_by_username().returning(|_| Ok(None));
    // Free at check time, taken by the time the insert runs
    store
        .expect_find_appointment_by_slot()
        .returning(|_, _| Ok(None));
    store
        .expect_book_appointment()
        .times(1)
        .returning(|_, _| Err(BookingError::Conflict(SLOT_TAKEN.to_string())));

    let result = ledger::create_appointment(
        &store,
        CreateAppointmentRequest {
            client_name: Some("Ana".to_string()),
            client_phone: Some("555".to_string()),
            service_id: Some(service_id.to_string()),
            date: Some("2030-05-10".to_string()),
            time: Some("09:00".to_string()),
            client_email: None,
        },
    )
    .await;

    match result {
        Err(BookingError::Conflict(message)) => assert_eq!(message, SLOT_TAKEN),
        other => panic!("expected a conflict, got {other:?}"),
    }
}
