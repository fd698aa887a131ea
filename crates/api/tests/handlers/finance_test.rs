use axum::http::{StatusCode, header::AUTHORIZATION};
use chrono::{Datelike, Local};
use pretty_assertions::assert_eq;
use barberbook_core::models::service::Service;
use serde_json::Value;

use crate::test_utils::{TestContext, bearer};

async fn book_completed(ctx: &TestContext, service: &Service, date: &str, time: &str) {
    let booked = ctx.book("Ana", "555", service, date, time).await;
    booked.assert_status(StatusCode::CREATED);
    let id = booked.json::<Value>()["appointment"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    ctx.set_status(&id, "completed").await.assert_status_ok();
}

#[tokio::test]
async fn test_daily_revenue_sums_completed_appointments() {
    let ctx = TestContext::new().await;
    let haircut = ctx.create_service("Haircut", 30.0).await;
    let beard = ctx.create_service("Beard", 20.0).await;

    book_completed(&ctx, &haircut, "2030-05-10", "09:00").await;
    book_completed(&ctx, &beard, "2030-05-10", "10:00").await;
    // Pending appointments earn nothing
    ctx.book("Bia", "777", &haircut, "2030-05-10", "11:00")
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .server
        .get("/api/finance/daily")
        .add_query_param("date", "2030-05-10")
        .add_header(AUTHORIZATION, ctx.admin())
        .await;
    response.assert_status_ok();

    let report = response.json::<Value>();
    assert_eq!(report["date"], "2030-05-10");
    assert_eq!(report["total_revenue"], 50.0);
    assert_eq!(report["total_appointments"], 2);
    assert_eq!(report["services_count"]["Haircut"], 1);
    assert_eq!(report["services_count"]["Beard"], 1);
    assert_eq!(report["appointments"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_monthly_and_annual_buckets() {
    let ctx = TestContext::new().await;
    let haircut = ctx.create_service("Haircut", 30.0).await;

    book_completed(&ctx, &haircut, "2030-05-10", "09:00").await;
    book_completed(&ctx, &haircut, "2030-05-10", "09:30").await;
    book_completed(&ctx, &haircut, "2030-05-21", "09:00").await;
    book_completed(&ctx, &haircut, "2030-08-01", "09:00").await;

    let monthly = ctx
        .server
        .get("/api/finance/monthly")
        .add_query_param("year", 2030)
        .add_query_param("month", 5)
        .add_header(AUTHORIZATION, ctx.admin())
        .await
        .json::<Value>();
    assert_eq!(monthly["total_revenue"], 90.0);
    assert_eq!(monthly["total_appointments"], 3);
    assert_eq!(monthly["daily_revenue"]["2030-05-10"], 60.0);
    assert_eq!(monthly["daily_revenue"]["2030-05-21"], 30.0);

    let annual = ctx
        .server
        .get("/api/finance/annual")
        .add_query_param("year", 2030)
        .add_header(AUTHORIZATION, ctx.admin())
        .await
        .json::<Value>();
    assert_eq!(annual["total_revenue"], 120.0);
    assert_eq!(annual["monthly_revenue"]["2030-05"], 90.0);
    assert_eq!(annual["monthly_revenue"]["2030-08"], 30.0);
}

#[tokio::test]
async fn test_monthly_rejects_month_out_of_range() {
    let ctx = TestContext::new().await;

    ctx.server
        .get("/api/finance/monthly")
        .add_query_param("year", 2030)
        .add_query_param("month", 13)
        .add_header(AUTHORIZATION, ctx.admin())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_daily_rejects_malformed_date() {
    let ctx = TestContext::new().await;

    ctx.server
        .get("/api/finance/daily")
        .add_query_param("date", "yesterday")
        .add_header(AUTHORIZATION, ctx.admin())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_summary_defaults_to_today() {
    let ctx = TestContext::new().await;
    let haircut = ctx.create_service("Haircut", 30.0).await;
    let today = Local::now().date_naive();
    let date = today.format("%Y-%m-%d").to_string();

    book_completed(&ctx, &haircut, &date, "08:00").await;
    ctx.book("Bia", "777", &haircut, &date, "09:00")
        .await
        .assert_status(StatusCode::CREATED);

    let summary = ctx
        .server
        .get("/api/finance/summary")
        .add_header(AUTHORIZATION, ctx.admin())
        .await
        .json::<Value>();
    assert_eq!(summary["today"]["revenue"], 30.0);
    assert_eq!(summary["today"]["appointments"], 1);
    assert_eq!(summary["today"]["pending"], 1);
    assert_eq!(summary["month"]["revenue"], 30.0);
    assert_eq!(summary["year"]["appointments"], 1);

    let daily = ctx
        .server
        .get("/api/finance/daily")
        .add_header(AUTHORIZATION, ctx.admin())
        .await
        .json::<Value>();
    assert_eq!(daily["date"], date.as_str());

    let annual = ctx
        .server
        .get("/api/finance/annual")
        .add_header(AUTHORIZATION, ctx.admin())
        .await
        .json::<Value>();
    assert_eq!(annual["year"], today.year());
}

#[tokio::test]
async fn test_finance_is_admin_only() {
    let ctx = TestContext::new().await;
    let (_, token) = ctx.register_client("bia", "777").await;

    for path in [
        "/api/finance/daily",
        "/api/finance/monthly",
        "/api/finance/annual",
        "/api/finance/summary",
    ] {
        ctx.server
            .get(path)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        ctx.server
            .get(path)
            .add_header(AUTHORIZATION, bearer(&token))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
