// tests/integration/subscription/error_response_tests.rs

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::common::app_helper;

#[tokio::test]
async fn test_validation_error_response_shape() {
    let (app, store) = app_helper::setup_memory_app();

    let payload = json!({
        "service_name": "Netflix",
        "price": 0,
        "user_id": "user123",
        "start_date": "01-2024"
    });
    let req = app_helper::json_request("POST", "/subscriptions", Some(payload.to_string()));
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = app_helper::response_json(res).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error_type"], "validation_error");
    assert_eq!(body["message"], "price must be positive");
    assert_eq!(store.total_calls(), 0);
}

#[tokio::test]
async fn test_invalid_month_year_is_bad_request() {
    let (app, _store) = app_helper::setup_memory_app();

    let payload = json!({
        "service_name": "Netflix",
        "price": 999,
        "user_id": "user123",
        "start_date": "2024-01"
    });
    let req = app_helper::json_request("POST", "/subscriptions", Some(payload.to_string()));
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = app_helper::response_json(res).await;
    assert_eq!(
        body["message"],
        "invalid start_date format, expected MM-YYYY"
    );
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (app, store) = app_helper::setup_memory_app();

    let req = app_helper::json_request(
        "POST",
        "/subscriptions",
        Some("{\"service_name\": \"Netflix\", ".to_string()),
    );
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = app_helper::response_json(res).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error_type"], "bad_request");
    assert_eq!(store.total_calls(), 0);
}

#[tokio::test]
async fn test_wrong_field_type_is_bad_request() {
    let (app, _store) = app_helper::setup_memory_app();

    let payload = json!({
        "service_name": "Netflix",
        "price": "expensive",
        "user_id": "user123",
        "start_date": "01-2024"
    });
    let req = app_helper::json_request("PUT", "/subscriptions/abc", Some(payload.to_string()));
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = app_helper::response_json(res).await;
    assert_eq!(body["error_type"], "bad_request");
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let (app, _store) = app_helper::setup_memory_app();

    let req = app_helper::json_request("GET", "/subscriptions/not-a-real-id", None);
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = app_helper::response_json(res).await;
    assert_eq!(body["error_type"], "not_found");
}

#[tokio::test]
async fn test_store_failure_is_internal_error_without_details_leak() {
    let (app, store) = app_helper::setup_memory_app();
    store.set_unavailable(true);

    let req = app_helper::json_request("GET", "/subscriptions", None);
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = app_helper::response_json(res).await;
    assert_eq!(body["error_type"], "database_error");
    assert_eq!(body["message"], "A database error occurred");
    assert!(!body.to_string().contains("connection refused"));
}
