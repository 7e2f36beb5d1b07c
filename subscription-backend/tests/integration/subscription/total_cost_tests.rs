// tests/integration/subscription/total_cost_tests.rs

use axum::{http::StatusCode, Router};
use serde_json::Value;
use subscription_backend::api::dto::subscription_dto::CreateSubscriptionDto;
use tower::ServiceExt;

use crate::common::{app_helper, test_data};

async fn seed(app: &Router, payloads: Vec<CreateSubscriptionDto>) {
    for payload in payloads {
        let req = app_helper::json_request(
            "POST",
            "/subscriptions",
            Some(serde_json::to_string(&payload).unwrap()),
        );
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }
}

async fn total(app: &Router, query: &str) -> (StatusCode, Value) {
    let uri = if query.is_empty() {
        "/subscriptions/total".to_string()
    } else {
        format!("/subscriptions/total?{}", query)
    };
    let res = app
        .clone()
        .oneshot(app_helper::json_request("GET", &uri, None))
        .await
        .unwrap();
    let status = res.status();
    (status, app_helper::response_json(res).await)
}

#[tokio::test]
async fn test_total_cost_for_user_in_period() {
    let (app, _db) = app_helper::setup_db_app().await;
    seed(&app, test_data::quarterly_fixture()).await;

    let (status, body) = total(
        &app,
        "user_id=user123&start_date=01-2024&end_date=02-2024",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_cost"], 1998);
    assert_eq!(body["data"]["user_id"], "user123");
    assert_eq!(body["data"]["start_date"], "01-2024");
    assert_eq!(body["data"]["end_date"], "02-2024");
    assert!(body["data"].get("service_name").is_none());
}

#[tokio::test]
async fn test_total_cost_without_filters() {
    let (app, _db) = app_helper::setup_db_app().await;

    let (status, body) = total(&app, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_cost"], 0);

    let mut payloads = test_data::quarterly_fixture();
    payloads.push(test_data::create_subscription_with(
        "Spotify", 300, "user456", "05-2023", None,
    ));
    seed(&app, payloads).await;

    let (_, body) = total(&app, "").await;
    assert_eq!(body["data"]["total_cost"], 999 * 3 + 300);
}

#[tokio::test]
async fn test_total_cost_by_service_and_unknown_user() {
    let (app, _db) = app_helper::setup_db_app().await;
    let mut payloads = test_data::quarterly_fixture();
    payloads.push(test_data::create_subscription_with(
        "Spotify", 300, "user123", "01-2024", None,
    ));
    seed(&app, payloads).await;

    let (_, body) = total(&app, "service_name=Spotify").await;
    assert_eq!(body["data"]["total_cost"], 300);

    let (_, body) = total(&app, "user_id=u1").await;
    assert_eq!(body["data"]["total_cost"], 0);
}

#[tokio::test]
async fn test_total_cost_empty_parameters_are_ignored() {
    let (app, _db) = app_helper::setup_db_app().await;
    seed(&app, test_data::quarterly_fixture()).await;

    let (status, body) = total(&app, "user_id=&service_name=&start_date=&end_date=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_cost"], 999 * 3);
}

#[tokio::test]
async fn test_total_cost_rejects_bad_dates() {
    let (app, _store) = app_helper::setup_memory_app();

    let (status, body) = total(&app, "start_date=13-2024").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");

    let (status, body) = total(&app, "start_date=03-2024&end_date=01-2024").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "end_date cannot be before start_date");
}
