// src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

// 入力順に最初のエラーメッセージを返す
const VALIDATED_FIELDS: [&str; 5] = ["service_name", "price", "user_id", "start_date", "end_date"];

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),

    #[error("{context}: {source}")]
    Store {
        context: String,
        #[source]
        source: DbErr,
    },

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// ストア層のエラーに文脈を付与する（種類は変えない）
    pub fn context(self, context: &str) -> Self {
        match self {
            AppError::DbErr(source) => AppError::Store {
                context: context.to_string(),
                source,
            },
            AppError::Store { context: inner, source } => AppError::Store {
                context: format!("{}: {}", context, inner),
                source,
            },
            other => other,
        }
    }

    pub fn is_store_error(&self) -> bool {
        matches!(self, AppError::DbErr(_) | AppError::Store { .. })
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let message = VALIDATED_FIELDS
            .iter()
            .filter_map(|field| field_errors.get(*field))
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| format!("Validation failed: {}", errors));

        AppError::ValidationError(message)
    }
}

// axum でエラーをHTTPレスポンスに変換するための実装
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::DbErr(ref db_err) | AppError::Store { source: ref db_err, .. } => {
                // サーバーログには詳細を出す
                tracing::error!(error = %self, "Database error");

                let details = match db_err {
                    DbErr::Exec(_) => Some(json!({ "operation": "exec" })),
                    DbErr::Query(_) => Some(json!({ "operation": "query" })),
                    DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
                        Some(json!({ "operation": "connect" }))
                    }
                    _ => None,
                };

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("A database error occurred", "database_error")
                        .with_details(details),
                )
            }
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(message, "not_found"),
            ),
            AppError::ValidationError(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(message, "validation_error"),
            ),
            AppError::Conflict(message) => (
                StatusCode::CONFLICT,
                ErrorResponse::new(message, "conflict"),
            ),
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(message, "bad_request"),
            ),
        };

        (status, Json(error_response)).into_response()
    }
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;

/// 統一的なエラーレスポンス構造
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub error_type: String,
}

impl ErrorResponse {
    fn new(message: impl Into<String>, error_type: &str) -> Self {
        let message = message.into();
        Self {
            success: false,
            error: message.clone(),
            message,
            details: None,
            error_type: error_type.to_string(),
        }
    }

    fn with_details(mut self, details: Option<serde_json::Value>) -> Self {
        self.details = details;
        self
    }
}
