use axum::http::{StatusCode, header::AUTHORIZATION};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::{TestContext, bearer, error_message};

fn week() -> Value {
    json!([
        { "day_of_week": 5, "start_time": "08:00", "end_time": "14:00", "is_extended": true },
        { "day_of_week": 0, "start_time": "09:00", "end_time": "18:00" },
        { "day_of_week": 2, "start_time": "09:00", "end_time": "18:00" },
    ])
}

async fn schedule(ctx: &TestContext) -> Vec<Value> {
    let response = ctx.server.get("/api/work_schedule").await;
    response.assert_status_ok();
    response.json::<Value>()["work_schedule"]
        .as_array()
        .unwrap()
        .clone()
}

#[tokio::test]
async fn test_replace_returns_sorted_week() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/work_schedule")
        .add_header(AUTHORIZATION, ctx.admin())
        .json(&week())
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        "Work schedule updated successfully"
    );

    let days = schedule(&ctx).await;
    let names: Vec<&str> = days.iter().map(|d| d["day_name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Monday", "Wednesday", "Saturday"]);
    assert_eq!(days[0]["is_extended"], false);
    assert_eq!(days[2]["is_extended"], true);
    assert_eq!(days[2]["end_time"], "14:00");
}

#[tokio::test]
async fn test_bad_payload_keeps_previous_schedule() {
    let ctx = TestContext::new().await;
    ctx.server
        .post("/api/work_schedule")
        .add_header(AUTHORIZATION, ctx.admin())
        .json(&week())
        .await
        .assert_status_ok();

    let cases = [
        (json!({ "day_of_week": 1 }), "must be a list"),
        (
            json!([
                { "day_of_week": 1, "start_time": "09:00", "end_time": "18:00" },
                { "day_of_week": 3, "start_time": "09:00" },
            ]),
            "end_time is required",
        ),
        (
            json!([{ "day_of_week": 7, "start_time": "09:00", "end_time": "18:00" }]),
            "Invalid day of week",
        ),
        (
            json!([{ "day_of_week": 1, "start_time": "9am", "end_time": "18:00" }]),
            "Invalid time",
        ),
        (
            json!([
                { "day_of_week": 1, "start_time": "09:00", "end_time": "18:00" },
                { "day_of_week": 1, "start_time": "10:00", "end_time": "12:00" },
            ]),
            "more than once",
        ),
    ];

    for (payload, expected) in cases {
        let response = ctx
            .server
            .post("/api/work_schedule")
            .add_header(AUTHORIZATION, ctx.admin())
            .json(&payload)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let message = error_message(&response);
        assert!(message.contains(expected), "{payload} -> {message}");
    }

    assert_eq!(schedule(&ctx).await.len(), 3);
}

#[tokio::test]
async fn test_empty_list_clears_schedule() {
    let ctx = TestContext::new().await;
    ctx.server
        .post("/api/work_schedule")
        .add_header(AUTHORIZATION, ctx.admin())
        .json(&week())
        .await
        .assert_status_ok();

    ctx.server
        .post("/api/work_schedule")
        .add_header(AUTHORIZATION, ctx.admin())
        .json(&json!([]))
        .await
        .assert_status_ok();

    assert!(schedule(&ctx).await.is_empty());
}

#[tokio::test]
async fn test_single_day_upsert() {
    let ctx = TestContext::new().await;

    let created = ctx
        .server
        .put("/api/work_schedule/3")
        .add_header(AUTHORIZATION, ctx.admin())
        .json(&json!({ "start_time": "10:00" }))
        .await;
    created.assert_status_ok();
    let body = created.json::<Value>();
    assert_eq!(body["message"], "Work schedule for Thursday updated successfully");
    assert_eq!(body["schedule"]["start_time"], "10:00");
    assert_eq!(body["schedule"]["end_time"], Value::Null);
    assert_eq!(body["schedule"]["is_extended"], false);

    let patched = ctx
        .server
        .put("/api/work_schedule/3")
        .add_header(AUTHORIZATION, ctx.admin())
        .json(&json!({ "end_time": "19:00", "is_extended": true }))
        .await;
    patched.assert_status_ok();
    let day = &patched.json::<Value>()["schedule"];
    assert_eq!(day["start_time"], "10:00");
    assert_eq!(day["end_time"], "19:00");
    assert_eq!(day["is_extended"], true);

    assert_eq!(schedule(&ctx).await.len(), 1);

    ctx.server
        .put("/api/work_schedule/7")
        .add_header(AUTHORIZATION, ctx.admin())
        .json(&json!({ "start_time": "10:00" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    ctx.server
        .put("/api/work_schedule/3")
        .add_header(AUTHORIZATION, ctx.admin())
        .json(&json!({ "end_time": "7pm" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_day() {
    let ctx = TestContext::new().await;
    ctx.server
        .post("/api/work_schedule")
        .add_header(AUTHORIZATION, ctx.admin())
        .json(&week())
        .await
        .assert_status_ok();

    ctx.server
        .delete("/api/work_schedule/0")
        .add_header(AUTHORIZATION, ctx.admin())
        .await
        .assert_status_ok();
    ctx.server
        .delete("/api/work_schedule/0")
        .add_header(AUTHORIZATION, ctx.admin())
        .await
        .assert_status(StatusCode::NOT_FOUND);
    ctx.server
        .delete("/api/work_schedule/9")
        .add_header(AUTHORIZATION, ctx.admin())
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(schedule(&ctx).await.len(), 2);
}

#[tokio::test]
async fn test_schedule_writes_are_admin_only() {
    let ctx = TestContext::new().await;
    let (_, token) = ctx.register_client("jo", "908").await;

    ctx.server
        .post("/api/work_schedule")
        .json(&week())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    ctx.server
        .post("/api/work_schedule")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&week())
        .await
        .assert_status(StatusCode::FORBIDDEN);
    ctx.server
        .delete("/api/work_schedule/0")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert!(schedule(&ctx).await.is_empty());
}
