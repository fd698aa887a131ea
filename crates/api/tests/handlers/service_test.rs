use axum::http::{StatusCode, header::AUTHORIZATION};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::{TestContext, bearer, error_message};

#[tokio::test]
async fn test_service_catalog_is_public_and_sorted() {
    let ctx = TestContext::new().await;
    ctx.create_service("Haircut", 30.0).await;
    let beard = ctx.create_service("Beard", 20.0).await;

    let list = ctx.server.get("/api/services").await;
    list.assert_status_ok();
    let names: Vec<String> = list.json::<Value>()["services"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Beard", "Haircut"]);

    let single = ctx.server.get(&format!("/api/services/{}", beard.id)).await;
    single.assert_status_ok();
    assert_eq!(single.json::<Value>()["service"]["price"], 20.0);

    ctx.server
        .get(&format!("/api/services/{}", uuid::Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_service_validates_input() {
    let ctx = TestContext::new().await;
    ctx.create_service("Haircut", 30.0).await;

    let cases = [
        (json!({ "duration": 30, "price": 10.0 }), "name is required"),
        (json!({ "name": "Shave", "price": 10.0 }), "duration is required"),
        (json!({ "name": "Shave", "duration": 30 }), "price is required"),
        (json!({ "name": "Shave", "duration": 0, "price": 10.0 }), "duration"),
        (json!({ "name": "Shave", "duration": 30, "price": -1.0 }), "price"),
        (json!({ "name": "Haircut", "duration": 30, "price": 10.0 }), "already exists"),
    ];

    for (payload, expected) in cases {
        let response = ctx
            .server
            .post("/api/services")
            .add_header(AUTHORIZATION, ctx.admin())
            .json(&payload)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let message = error_message(&response);
        assert!(
            message.contains(expected),
            "{payload} -> {message}, expected {expected}"
        );
    }
}

#[tokio::test]
async fn test_update_service_changes_only_given_fields() {
    let ctx = TestContext::new().await;
    let haircut = ctx.create_service("Haircut", 30.0).await;
    ctx.create_service("Beard", 20.0).await;
    let path = format!("/api/services/{}", haircut.id);

    let response = ctx
        .server
        .put(&path)
        .add_header(AUTHORIZATION, ctx.admin())
        .json(&json!({ "price": 35.0 }))
        .await;
    response.assert_status_ok();
    let service = &response.json::<Value>()["service"];
    assert_eq!(service["name"], "Haircut");
    assert_eq!(service["duration"], 30);
    assert_eq!(service["price"], 35.0);

    ctx.server
        .put(&path)
        .add_header(AUTHORIZATION, ctx.admin())
        .json(&json!({ "name": "Beard" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_referenced_service_cannot_be_deleted() {
    let ctx = TestContext::new().await;
    let haircut = ctx.create_service("Haircut", 30.0).await;
    let unused = ctx.create_service("Beard", 20.0).await;
    ctx.book("Ana", "555", &haircut, "2030-05-10", "09:00")
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .server
        .delete(&format!("/api/services/{}", haircut.id))
        .add_header(AUTHORIZATION, ctx.admin())
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(error_message(&response).starts_with("Conflict:"));

    ctx.server
        .delete(&format!("/api/services/{}", unused.id))
        .add_header(AUTHORIZATION, ctx.admin())
        .await
        .assert_status_ok();
    ctx.server
        .delete(&format!("/api/services/{}", unused.id))
        .add_header(AUTHORIZATION, ctx.admin())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_catalog_writes_are_admin_only() {
    let ctx = TestContext::new().await;
    let (_, token) = ctx.register_client("bia", "777").await;

    ctx.server
        .post("/api/services")
        .json(&json!({ "name": "Shave", "duration": 15, "price": 10.0 }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    ctx.server
        .post("/api/services")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "name": "Shave", "duration": 15, "price": 10.0 }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}
