// src/api/handlers/subscription_handler.rs
use crate::api::dto::subscription_dto::{
    CreateSubscriptionDto, SubscriptionDto, TotalCostQuery, TotalCostResponse,
    UpdateSubscriptionDto,
};
use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::logging::{inject_request_context, logging_middleware};
use crate::types::ApiResponse;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Json, Path, Query, State,
    },
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

// 壊れた JSON は 400 bad_request として返す
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected request body");
        AppError::BadRequest(rejection.body_text())
    })
}

// --- CRUD Handlers ---

pub async fn create_subscription_handler(
    State(app_state): State<AppState>,
    payload: Result<Json<CreateSubscriptionDto>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = json_body(payload)?;

    let subscription = app_state
        .subscription_service
        .create_subscription(payload)
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::success(subscription)))
}

pub async fn get_subscription_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<SubscriptionDto>> {
    let subscription = app_state.subscription_service.get_subscription(&id).await?;
    Ok(ApiResponse::success(subscription))
}

pub async fn list_subscriptions_handler(
    State(app_state): State<AppState>,
) -> AppResult<ApiResponse<Vec<SubscriptionDto>>> {
    let subscriptions = app_state.subscription_service.list_subscriptions().await?;
    Ok(ApiResponse::list(subscriptions))
}

pub async fn update_subscription_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSubscriptionDto>, JsonRejection>,
) -> AppResult<ApiResponse<SubscriptionDto>> {
    let payload = json_body(payload)?;

    let subscription = app_state
        .subscription_service
        .update_subscription(&id, payload)
        .await?;

    Ok(ApiResponse::success(subscription))
}

pub async fn delete_subscription_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    app_state
        .subscription_service
        .delete_subscription(&id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// --- Aggregation ---

/// 条件に一致するサブスクリプションの合計金額
pub async fn total_cost_handler(
    State(app_state): State<AppState>,
    query: Result<Query<TotalCostQuery>, QueryRejection>,
) -> AppResult<ApiResponse<TotalCostResponse>> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let total_cost = app_state
        .subscription_service
        .calculate_total_cost(&query)
        .await?;

    info!(total_cost, "Total cost request served");
    Ok(ApiResponse::success(TotalCostResponse::new(total_cost, query)))
}

async fn health_check_handler() -> &'static str {
    "OK"
}

// --- Router Setup ---

pub fn subscription_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/subscriptions",
            get(list_subscriptions_handler).post(create_subscription_handler),
        )
        .route("/subscriptions/total", get(total_cost_handler))
        .route(
            "/subscriptions/{id}",
            get(get_subscription_handler)
                .put(update_subscription_handler)
                .delete(delete_subscription_handler),
        )
        .route("/health", get(health_check_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(inject_request_context))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
