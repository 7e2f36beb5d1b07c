// src/service/subscription_service.rs

use crate::api::dto::subscription_dto::{
    CreateSubscriptionDto, SubscriptionDto, TotalCostQuery, UpdateSubscriptionDto,
    END_DATE_FORMAT_ERROR, START_DATE_FORMAT_ERROR,
};
use crate::db::DbPool;
use crate::domain::cost_filter::CostFilter;
use crate::domain::month_year::MonthYear;
use crate::domain::subscription_model::{self, SubscriptionChanges};
use crate::error::{AppError, AppResult};
use crate::repository::subscription_repository::{SubscriptionRepository, SubscriptionStore};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

const END_BEFORE_START_ERROR: &str = "end_date cannot be before start_date";

/// 検証済みの入力値
struct ValidatedSubscription {
    service_name: String,
    price: i32,
    user_id: String,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct SubscriptionService {
    store: Arc<dyn SubscriptionStore>,
}

impl SubscriptionService {
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self { store }
    }

    pub fn with_db(db_pool: DbPool) -> Self {
        Self::new(Arc::new(SubscriptionRepository::new(db_pool)))
    }

    pub fn with_schema(db_pool: DbPool, schema: String) -> Self {
        Self::new(Arc::new(SubscriptionRepository::with_schema(
            db_pool, schema,
        )))
    }

    // --- CRUD ---

    pub async fn create_subscription(
        &self,
        payload: CreateSubscriptionDto,
    ) -> AppResult<SubscriptionDto> {
        info!(
            user_id = %payload.user_id,
            service_name = %payload.service_name,
            price = payload.price,
            "Creating subscription"
        );

        validate_fields(&payload)?;
        let input = parse_subscription(payload)?;

        let id = Uuid::new_v4().to_string();
        let subscription = subscription_model::Model::new(
            id.clone(),
            input.service_name,
            input.price,
            input.user_id,
            input.start_date,
            input.end_date,
        );

        let created = self.store.insert(subscription).await.map_err(|e| {
            error!(subscription_id = %id, error = %e, "Failed to save subscription");
            e.context("could not persist subscription")
        })?;

        info!(subscription_id = %created.id, "Subscription created successfully");
        Ok(created.into())
    }

    pub async fn get_subscription(&self, id: &str) -> AppResult<SubscriptionDto> {
        require_id(id)?;

        let subscription = self.store.find_by_id(id).await.map_err(|e| {
            log_store_failure(&e, id, "Failed to get subscription");
            e.context("could not load subscription")
        })?;

        Ok(subscription.into())
    }

    pub async fn list_subscriptions(&self) -> AppResult<Vec<SubscriptionDto>> {
        let subscriptions = self.store.list().await.map_err(|e| {
            error!(error = %e, "Failed to list subscriptions");
            e.context("could not list subscriptions")
        })?;

        info!(count = subscriptions.len(), "Subscriptions retrieved");
        Ok(subscriptions.into_iter().map(Into::into).collect())
    }

    /// 全フィールドを置き換えて更新し、永続化後の状態を読み直して返す
    pub async fn update_subscription(
        &self,
        id: &str,
        payload: UpdateSubscriptionDto,
    ) -> AppResult<SubscriptionDto> {
        info!(subscription_id = %id, "Updating subscription");

        require_id(id)?;
        validate_fields(&payload)?;
        let input = parse_subscription(payload.into())?;

        let changes = SubscriptionChanges {
            service_name: input.service_name,
            price: input.price,
            user_id: input.user_id,
            start_date: input.start_date,
            end_date: input.end_date,
            updated_at: Utc::now(),
        };

        self.store.update(id, changes).await.map_err(|e| {
            log_store_failure(&e, id, "Failed to update subscription");
            e.context("could not update subscription")
        })?;

        // 更新と再取得の間に削除された場合は NotFound になる
        let updated = self.store.find_by_id(id).await.map_err(|e| {
            log_store_failure(&e, id, "Failed to reload updated subscription");
            e.context("could not load updated subscription")
        })?;

        info!(subscription_id = %id, "Subscription updated successfully");
        Ok(updated.into())
    }

    pub async fn delete_subscription(&self, id: &str) -> AppResult<()> {
        require_id(id)?;

        self.store.delete(id).await.map_err(|e| {
            log_store_failure(&e, id, "Failed to delete subscription");
            e.context("could not delete subscription")
        })?;

        info!(subscription_id = %id, "Subscription deleted successfully");
        Ok(())
    }

    // --- Aggregation ---

    /// 指定された条件（AND）に一致するサブスクリプションの価格合計
    pub async fn calculate_total_cost(&self, query: &TotalCostQuery) -> AppResult<i64> {
        info!(
            user_id = ?query.user_id,
            service_name = ?query.service_name,
            start_date = ?query.start_date,
            end_date = ?query.end_date,
            "Calculating total cost"
        );

        let start = parse_optional_date(query.start_date.as_deref(), START_DATE_FORMAT_ERROR)?;
        let end = parse_optional_date(query.end_date.as_deref(), END_DATE_FORMAT_ERROR)?;

        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                warn!(%start, %end, "End date before start date for total cost");
                return Err(AppError::ValidationError(END_BEFORE_START_ERROR.to_string()));
            }
        }

        let filter = CostFilter {
            user_id: non_empty(query.user_id.as_deref()),
            service_name: non_empty(query.service_name.as_deref()),
            start_date_from: start.map(MonthYear::first_day),
            start_date_to: end.map(MonthYear::first_day),
        };

        let total = self.store.sum_by_filter(&filter).await.map_err(|e| {
            error!(error = %e, "Failed to calculate total cost");
            e.context("could not calculate total cost")
        })?;

        info!(
            total_cost = total,
            unbounded = filter.is_unbounded(),
            "Total cost calculated"
        );
        Ok(total)
    }
}

fn require_id(id: &str) -> AppResult<()> {
    if id.is_empty() {
        warn!("Subscription id is required");
        return Err(AppError::ValidationError("id is required".to_string()));
    }
    Ok(())
}

// 空文字は「条件なし」として扱う
fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn parse_optional_date(value: Option<&str>, message: &str) -> AppResult<Option<MonthYear>> {
    match value.filter(|v| !v.is_empty()) {
        Some(raw) => raw.parse::<MonthYear>().map(Some).map_err(|_| {
            warn!(value = %raw, "Invalid month-year value");
            AppError::ValidationError(message.to_string())
        }),
        None => Ok(None),
    }
}

fn validate_fields<T: Validate>(payload: &T) -> AppResult<()> {
    payload.validate().map_err(|e| {
        warn!(error = %e, "Subscription payload validation failed");
        AppError::from(e)
    })
}

// フィールド単位の検証後に呼ぶ（期間の前後関係はここで確認する）
fn parse_subscription(payload: CreateSubscriptionDto) -> AppResult<ValidatedSubscription> {
    let start_date: MonthYear = payload
        .start_date
        .parse()
        .map_err(|_| AppError::ValidationError(START_DATE_FORMAT_ERROR.to_string()))?;

    let end_date = parse_optional_date(payload.end_date.as_deref(), END_DATE_FORMAT_ERROR)?;
    if let Some(end_date) = end_date {
        if end_date < start_date {
            warn!(%start_date, %end_date, "End date cannot be before start date");
            return Err(AppError::ValidationError(END_BEFORE_START_ERROR.to_string()));
        }
    }

    Ok(ValidatedSubscription {
        service_name: payload.service_name,
        price: payload.price,
        user_id: payload.user_id,
        start_date: start_date.first_day(),
        end_date: end_date.map(MonthYear::first_day),
    })
}

fn log_store_failure(error: &AppError, id: &str, message: &str) {
    match error {
        AppError::NotFound(_) => warn!(subscription_id = %id, "{}", message),
        _ => error!(subscription_id = %id, error = %error, "{}", message),
    }
}
