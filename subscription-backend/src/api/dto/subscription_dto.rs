// src/api/dto/subscription_dto.rs
use crate::domain::month_year::MonthYear;
use crate::domain::subscription_model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

pub const START_DATE_FORMAT_ERROR: &str = "invalid start_date format, expected MM-YYYY";
pub const END_DATE_FORMAT_ERROR: &str = "invalid end_date format, expected MM-YYYY";

fn month_year_error(message: &'static str) -> ValidationError {
    ValidationError::new("month_year").with_message(Cow::Borrowed(message))
}

/// start_date は必須の MM-YYYY
pub fn validate_start_date(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<MonthYear>()
        .map(|_| ())
        .map_err(|_| month_year_error(START_DATE_FORMAT_ERROR))
}

/// end_date は空文字なら期限なしとして扱う
pub fn validate_end_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    value
        .parse::<MonthYear>()
        .map(|_| ())
        .map_err(|_| month_year_error(END_DATE_FORMAT_ERROR))
}

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Validate)]
pub struct CreateSubscriptionDto {
    #[validate(length(min = 1, message = "service_name is required"))]
    pub service_name: String,

    #[validate(range(min = 1, message = "price must be positive"))]
    pub price: i32,

    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,

    /// MM-YYYY
    #[validate(custom(function = validate_start_date))]
    pub start_date: String,

    /// MM-YYYY（省略または空文字は期限なし）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = validate_end_date))]
    pub end_date: Option<String>,
}

/// 更新は id / created_at 以外の全フィールドを置き換える
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Validate)]
pub struct UpdateSubscriptionDto {
    #[validate(length(min = 1, message = "service_name is required"))]
    pub service_name: String,

    #[validate(range(min = 1, message = "price must be positive"))]
    pub price: i32,

    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,

    #[validate(custom(function = validate_start_date))]
    pub start_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = validate_end_date))]
    pub end_date: Option<String>,
}

impl From<UpdateSubscriptionDto> for CreateSubscriptionDto {
    fn from(dto: UpdateSubscriptionDto) -> Self {
        Self {
            service_name: dto.service_name,
            price: dto.price,
            user_id: dto.user_id,
            start_date: dto.start_date,
            end_date: dto.end_date,
        }
    }
}

/// 合計金額の集計クエリ。各項目は省略可能
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TotalCostQuery {
    pub user_id: Option<String>,
    pub service_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionDto {
    pub id: String,
    pub service_name: String,
    pub price: i32,
    pub user_id: String,
    pub start_date: MonthYear,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<MonthYear>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// SeaORM の Model から SubscriptionDto への変換
impl From<subscription_model::Model> for SubscriptionDto {
    fn from(model: subscription_model::Model) -> Self {
        Self {
            id: model.id,
            service_name: model.service_name,
            price: model.price,
            user_id: model.user_id,
            start_date: model.start_date.into(),
            end_date: model.end_date.map(Into::into),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TotalCostResponse {
    pub total_cost: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl TotalCostResponse {
    pub fn new(total_cost: i64, query: TotalCostQuery) -> Self {
        Self {
            total_cost,
            user_id: query.user_id,
            service_name: query.service_name,
            start_date: query.start_date,
            end_date: query.end_date,
        }
    }
}
