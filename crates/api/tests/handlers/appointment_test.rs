use axum::http::{StatusCode, header::AUTHORIZATION};
use barberbook_core::{
    availability::candidate_grid,
    ledger::{SLOT_TAKEN, next_free_username},
};
use chrono::Local;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::{TestContext, bearer, error_message};

const DAY: &str = "2030-05-10";

fn times(response: &Value) -> Vec<String> {
    response["available_times"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_str().unwrap().to_string())
        .collect()
}

#[test_log::test(tokio::test)]
async fn test_create_appointment_returns_pending_details() {
    let ctx = TestContext::new().await;
    let haircut = ctx.create_service("Haircut", 30.0).await;

    let response = ctx.book("Ana", "555", &haircut, DAY, "09:00").await;
    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["message"], "Appointment created successfully");
    assert_eq!(body["appointment"]["status"], "pending");
    assert_eq!(body["appointment"]["client_name"], "Ana");
    assert_eq!(body["appointment"]["service_name"], "Haircut");
    assert_eq!(body["appointment"]["service_price"], 30.0);
}

#[tokio::test]
async fn test_create_appointment_checks_required_fields_in_order() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/appointments")
        .json(&json!({ "client_phone": "555", "date": DAY }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&response),
        "Validation error: client_name is required"
    );

    let response = ctx
        .server
        .post("/api/appointments")
        .json(&json!({ "client_name": "Ana", "client_phone": "", "service_id": "x" }))
        .await;
    assert_eq!(
        error_message(&response),
        "Validation error: client_phone is required"
    );
}

#[tokio::test]
async fn test_create_appointment_rejects_malformed_input() {
    let ctx = TestContext::new().await;
    let haircut = ctx.create_service("Haircut", 30.0).await;

    ctx.book("Ana", "555", &haircut, "10/05/2030", "09:00")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    ctx.book("Ana", "555", &haircut, DAY, "9am")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = ctx
        .server
        .post("/api/appointments")
        .json(&json!({
            "client_name": "Ana",
            "client_phone": "555",
            "service_id": "not-a-uuid",
            "date": DAY,
            "time": "09:00",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = ctx
        .server
        .post("/api/appointments")
        .json(&json!({
            "client_name": "Ana",
            "client_phone": "555",
            "service_id": uuid::Uuid::new_v4().to_string(),
            "date": DAY,
            "time": "09:00",
        }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_second_booking_of_a_slot_is_a_conflict() {
    let ctx = TestContext::new().await;
    let haircut = ctx.create_service("Haircut", 30.0).await;

    ctx.book("Ana", "555", &haircut, DAY, "09:00")
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx.book("Bia", "777", &haircut, DAY, "09:00").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&response), format!("Conflict: {SLOT_TAKEN}"));

    // The rejected booking must not leave a walk-in client behind
    assert!(ctx.store().find_client_by_phone("777").await.unwrap().is_none());
}

#[tokio::test]
async fn test_available_times_is_grid_minus_booked_slots() {
    let ctx = TestContext::new().await;
    let haircut = ctx.create_service("Haircut", 30.0).await;

    for time in ["08:00", "12:30", "17:30"] {
        ctx.book("Ana", "555", &haircut, DAY, time)
            .await
            .assert_status(StatusCode::CREATED);
    }
    ctx.book("Ana", "555", &haircut, "2030-05-11", "10:00")
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .server
        .get("/api/appointments/available-times")
        .add_query_param("date", DAY)
        .add_query_param("service_id", haircut.id)
        .await;
    response.assert_status_ok();

    let expected: Vec<String> = candidate_grid()
        .into_iter()
        .filter(|t| !["08:00", "12:30", "17:30"].contains(&t.as_str()))
        .collect();
    let available = times(&response.json::<Value>());
    assert_eq!(available.len(), 17);
    assert_eq!(available, expected);
}

#[tokio::test]
async fn test_cancelled_appointments_keep_their_slot() {
    let ctx = TestContext::new().await;
    let haircut = ctx.create_service("Haircut", 30.0).await;

    let booked = ctx.book("Ana", "555", &haircut, DAY, "10:00").await;
    let id = booked.json::<Value>()["appointment"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    ctx.set_status(&id, "cancelled").await.assert_status_ok();

    let response = ctx
        .server
        .get("/api/appointments/available-times")
        .add_query_param("date", DAY)
        .add_query_param("service_id", haircut.id)
        .await;
    assert!(!times(&response.json::<Value>()).contains(&"10:00".to_string()));

    ctx.book("Bia", "777", &haircut, DAY, "10:00")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_available_times_validates_its_query() {
    let ctx = TestContext::new().await;
    let haircut = ctx.create_service("Haircut", 30.0).await;

    ctx.server
        .get("/api/appointments/available-times")
        .add_query_param("date", DAY)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .get("/api/appointments/available-times")
        .add_query_param("date", "2030-13-40")
        .add_query_param("service_id", haircut.id)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .get("/api/appointments/available-times")
        .add_query_param("date", DAY)
        .add_query_param("service_id", uuid::Uuid::new_v4())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_booking_reuses_client_by_email_then_phone() {
    let ctx = TestContext::new().await;
    let haircut = ctx.create_service("Haircut", 30.0).await;

    let first = ctx
        .server
        .post("/api/appointments")
        .json(&json!({
            "client_name": "Ana",
            "client_phone": "555",
            "client_email": "ana@example.com",
            "service_id": haircut.id.to_string(),
            "date": DAY,
            "time": "09:00",
        }))
        .await;
    let ana = first.json::<Value>()["appointment"]["client_id"].clone();

    // Known email, different phone
    let by_email = ctx
        .server
        .post("/api/appointments")
        .json(&json!({
            "client_name": "Ana",
            "client_phone": "999",
            "client_email": "ana@example.com",
            "service_id": haircut.id.to_string(),
            "date": DAY,
            "time": "09:30",
        }))
        .await;
    assert_eq!(by_email.json::<Value>()["appointment"]["client_id"], ana);

    // Unknown email, known phone
    let by_phone = ctx
        .server
        .post("/api/appointments")
        .json(&json!({
            "client_name": "Ana",
            "client_phone": "555",
            "client_email": "other@example.com",
            "service_id": haircut.id.to_string(),
            "date": DAY,
            "time": "10:00",
        }))
        .await;
    assert_eq!(by_phone.json::<Value>()["appointment"]["client_id"], ana);
}

#[tokio::test]
async fn test_walk_in_usernames_are_disambiguated() {
    let ctx = TestContext::new().await;
    let haircut = ctx.create_service("Haircut", 30.0).await;

    // An account already owns the username "555" under another phone number
    ctx.register_client("555", "100").await;

    let response = ctx.book("Ana", "555", &haircut, DAY, "09:00").await;
    response.assert_status(StatusCode::CREATED);

    let client_id = response.json::<Value>()["appointment"]["client_id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    let walk_in = ctx.store().find_client(client_id).await.unwrap().unwrap();
    assert_eq!(walk_in.username, "555_1");
    assert_eq!(walk_in.phone, "555");

    assert_eq!(
        next_free_username(ctx.store(), "555").await.unwrap(),
        "555_2"
    );
}

#[tokio::test]
async fn test_walk_in_can_log_in_with_default_password() {
    let ctx = TestContext::new().await;
    let haircut = ctx.create_service("Haircut", 30.0).await;
    ctx.book("Ana", "555", &haircut, DAY, "09:00")
        .await
        .assert_status(StatusCode::CREATED);

    ctx.server
        .post("/api/login")
        .json(&json!({ "username": "555", "password": "123456" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_update_status_accepts_only_known_statuses() {
    let ctx = TestContext::new().await;
    let haircut = ctx.create_service("Haircut", 30.0).await;
    let booked = ctx.book("Ana", "555", &haircut, DAY, "09:00").await;
    let id = booked.json::<Value>()["appointment"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = ctx.set_status(&id, "done").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let unchanged = ctx
        .server
        .get(&format!("/api/appointments/{id}"))
        .add_header(AUTHORIZATION, ctx.admin())
        .await;
    assert_eq!(unchanged.json::<Value>()["appointment"]["status"], "pending");

    for status in ["confirmed", "completed", "pending", "cancelled"] {
        let response = ctx.set_status(&id, status).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["appointment"]["status"], status);
    }

    ctx.set_status(&uuid::Uuid::new_v4().to_string(), "confirmed")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_routes_require_admin() {
    let ctx = TestContext::new().await;
    let (_, client_token) = ctx.register_client("bia", "777").await;

    ctx.server
        .get("/api/appointments")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    ctx.server
        .get("/api/appointments")
        .add_header(AUTHORIZATION, bearer(&client_token))
        .await
        .assert_status(StatusCode::FORBIDDEN);
    ctx.server
        .get("/api/appointments/today")
        .add_header(AUTHORIZATION, bearer(&client_token))
        .await
        .assert_status(StatusCode::FORBIDDEN);
    ctx.server
        .get("/api/appointments")
        .add_header(AUTHORIZATION, bearer("stale-token"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_client_appointments_visible_to_owner_and_admin_only() {
    let ctx = TestContext::new().await;
    let haircut = ctx.create_service("Haircut", 30.0).await;
    let (ana, ana_token) = ctx.register_client("ana", "555").await;
    let (_, bia_token) = ctx.register_client("bia", "777").await;

    let booked = ctx.book("Ana", "555", &haircut, DAY, "09:00").await;
    let appointment_id = booked.json::<Value>()["appointment"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    ctx.book("Ana", "555", &haircut, "2030-06-01", "09:00")
        .await
        .assert_status(StatusCode::CREATED);

    let path = format!("/api/appointments/client/{}", ana.id);

    let own = ctx
        .server
        .get(&path)
        .add_header(AUTHORIZATION, bearer(&ana_token))
        .await;
    own.assert_status_ok();
    let own = own.json::<Value>();
    assert_eq!(own["appointments"].as_array().unwrap().len(), 2);
    assert_eq!(own["appointments"][0]["date"], "2030-06-01");

    ctx.server
        .get(&path)
        .add_header(AUTHORIZATION, ctx.admin())
        .await
        .assert_status_ok();
    ctx.server
        .get(&path)
        .add_header(AUTHORIZATION, bearer(&bia_token))
        .await
        .assert_status(StatusCode::FORBIDDEN);
    ctx.server
        .get(&path)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let single = format!("/api/appointments/{appointment_id}");
    ctx.server
        .get(&single)
        .add_header(AUTHORIZATION, bearer(&ana_token))
        .await
        .assert_status_ok();
    ctx.server
        .get(&single)
        .add_header(AUTHORIZATION, bearer(&bia_token))
        .await
        .assert_status(StatusCode::FORBIDDEN);
    ctx.server
        .get(&format!("/api/appointments/{}", uuid::Uuid::new_v4()))
        .add_header(AUTHORIZATION, bearer(&bia_token))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_all_and_today_are_ordered() {
    let ctx = TestContext::new().await;
    let haircut = ctx.create_service("Haircut", 30.0).await;
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();

    for (date, time) in [(DAY, "11:00"), (today.as_str(), "15:00"), (today.as_str(), "08:30")] {
        ctx.book("Ana", "555", &haircut, date, time)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let all = ctx
        .server
        .get("/api/appointments")
        .add_header(AUTHORIZATION, ctx.admin())
        .await
        .json::<Value>();
    let slots: Vec<String> = all["appointments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| format!("{} {}", a["date"].as_str().unwrap(), a["time"].as_str().unwrap()))
        .collect();
    assert_eq!(
        slots,
        vec![
            format!("{today} 08:30"),
            format!("{today} 15:00"),
            format!("{DAY} 11:00"),
        ]
    );

    let todays = ctx
        .server
        .get("/api/appointments/today")
        .add_header(AUTHORIZATION, ctx.admin())
        .await
        .json::<Value>();
    let todays_times: Vec<&str> = todays["appointments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["time"].as_str().unwrap())
        .collect();
    assert_eq!(todays_times, vec!["08:30", "15:00"]);
}

#[tokio::test]
async fn test_update_appointment_moves_and_validates() {
    let ctx = TestContext::new().await;
    let haircut = ctx.create_service("Haircut", 30.0).await;
    let beard = ctx.create_service("Beard", 20.0).await;

    let first = ctx.book("Ana", "555", &haircut, DAY, "09:00").await;
    let id = first.json::<Value>()["appointment"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    ctx.book("Bia", "777", &haircut, DAY, "10:00")
        .await
        .assert_status(StatusCode::CREATED);
    let path = format!("/api/appointments/{id}");

    let moved = ctx
        .server
        .put(&path)
        .add_header(AUTHORIZATION, ctx.admin())
        .json(&json!({ "service_id": beard.id, "time": "11:00" }))
        .await;
    moved.assert_status_ok();
    let moved = moved.json::<Value>();
    assert_eq!(moved["appointment"]["time"], "11:00");
    assert_eq!(moved["appointment"]["date"], DAY);
    assert_eq!(moved["appointment"]["service_name"], "Beard");

    // Onto a booked slot
    let response = ctx
        .server
        .put(&path)
        .add_header(AUTHORIZATION, ctx.admin())
        .json(&json!({ "time": "10:00" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&response), format!("Conflict: {SLOT_TAKEN}"));

    ctx.server
        .put(&path)
        .add_header(AUTHORIZATION, ctx.admin())
        .json(&json!({ "service_id": uuid::Uuid::new_v4() }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    ctx.server
        .put(&path)
        .add_header(AUTHORIZATION, ctx.admin())
        .json(&json!({ "status": "archived", "time": "12:00" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = ctx
        .server
        .put(&path)
        .add_header(AUTHORIZATION, ctx.admin())
        .json(&json!({ "service_id": "not-a-uuid", "time": "12:00" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&response),
        "Validation error: service_id is not a valid id: not-a-uuid"
    );

    let current = ctx.server.get(&path).add_header(AUTHORIZATION, ctx.admin()).await;
    assert_eq!(current.json::<Value>()["appointment"]["time"], "11:00");
}

#[tokio::test]
async fn test_delete_appointment_twice_is_not_found() {
    let ctx = TestContext::new().await;
    let haircut = ctx.create_service("Haircut", 30.0).await;
    let booked = ctx.book("Ana", "555", &haircut, DAY, "09:00").await;
    let path = format!(
        "/api/appointments/{}",
        booked.json::<Value>()["appointment"]["id"].as_str().unwrap()
    );

    ctx.server
        .delete(&path)
        .add_header(AUTHORIZATION, ctx.admin())
        .await
        .assert_status_ok();
    ctx.server
        .delete(&path)
        .add_header(AUTHORIZATION, ctx.admin())
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // The freed slot can be booked again
    ctx.book("Bia", "777", &haircut, DAY, "09:00")
        .await
        .assert_status(StatusCode::CREATED);
}
