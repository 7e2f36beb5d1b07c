// src/repository/subscription_repository.rs
use crate::db;
use crate::domain::cost_filter::CostFilter;
use crate::domain::subscription_model::{
    self, Entity as SubscriptionEntity, SubscriptionChanges,
};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{entity::*, query::*, DbConn, DbErr, SqlErr};

/// サブスクリプションの永続化操作。各操作はストアへの 1 往復で完結する
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// レコードを挿入（ID 重複は Conflict）
    async fn insert(
        &self,
        subscription: subscription_model::Model,
    ) -> AppResult<subscription_model::Model>;

    /// ID で取得（該当なしは NotFound）
    async fn find_by_id(&self, id: &str) -> AppResult<subscription_model::Model>;

    /// 可変フィールドを全て置き換える（影響行数 0 は NotFound）
    async fn update(&self, id: &str, changes: SubscriptionChanges) -> AppResult<()>;

    /// 物理削除（影響行数 0 は NotFound）
    async fn delete(&self, id: &str) -> AppResult<()>;

    /// 全件取得（順序はストア任せ）
    async fn list(&self) -> AppResult<Vec<subscription_model::Model>>;

    /// 条件に一致するレコードの price 合計（一致なしは 0）
    async fn sum_by_filter(&self, filter: &CostFilter) -> AppResult<i64>;
}

pub struct SubscriptionRepository {
    db: DbConn,
    schema: Option<String>,
}

impl SubscriptionRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db, schema: None }
    }

    pub fn with_schema(db: DbConn, schema: String) -> Self {
        Self {
            db,
            schema: Some(schema),
        }
    }

    // 各操作の前にスキーマを設定するヘルパーメソッド
    async fn prepare_connection(&self) -> Result<(), DbErr> {
        if let Some(schema) = &self.schema {
            db::set_schema(&self.db, schema).await?;
        }
        Ok(())
    }

    /// 指定されたフィルタのみを AND で結合した条件を組み立てる
    pub fn filter_condition(filter: &CostFilter) -> Condition {
        let mut conditions = Condition::all();

        if let Some(user_id) = &filter.user_id {
            conditions = conditions.add(subscription_model::Column::UserId.eq(user_id.as_str()));
        }

        if let Some(service_name) = &filter.service_name {
            conditions = conditions
                .add(subscription_model::Column::ServiceName.eq(service_name.as_str()));
        }

        // 期間はレコードの start_date に対して両端を含めて比較する
        if let Some(from) = filter.start_date_from {
            conditions = conditions.add(subscription_model::Column::StartDate.gte(from));
        }

        if let Some(to) = filter.start_date_to {
            conditions = conditions.add(subscription_model::Column::StartDate.lte(to));
        }

        conditions
    }

    /// COALESCE(SUM(price), 0) を返す集計クエリ
    pub fn sum_query(filter: &CostFilter) -> Select<SubscriptionEntity> {
        let total: SimpleExpr = Func::coalesce([
            Expr::col(subscription_model::Column::Price).sum(),
            Expr::val(0i64).into(),
        ])
        .into();

        SubscriptionEntity::find()
            .select_only()
            .column_as(total, "total_cost")
            .filter(Self::filter_condition(filter))
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Subscription with id {} not found", id))
}

#[async_trait]
impl SubscriptionStore for SubscriptionRepository {
    async fn insert(
        &self,
        subscription: subscription_model::Model,
    ) -> AppResult<subscription_model::Model> {
        self.prepare_connection().await?;

        let id = subscription.id.clone();
        subscription
            .into_insert_model()
            .insert(&self.db)
            .await
            .map_err(|err| match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    AppError::Conflict(format!("Subscription with id {} already exists", id))
                }
                _ => AppError::DbErr(err),
            })
    }

    async fn find_by_id(&self, id: &str) -> AppResult<subscription_model::Model> {
        self.prepare_connection().await?;

        SubscriptionEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn update(&self, id: &str, changes: SubscriptionChanges) -> AppResult<()> {
        self.prepare_connection().await?;

        let result = SubscriptionEntity::update_many()
            .set(changes.into_active_model())
            .filter(subscription_model::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.prepare_connection().await?;

        let result = SubscriptionEntity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<subscription_model::Model>> {
        self.prepare_connection().await?;
        Ok(SubscriptionEntity::find().all(&self.db).await?)
    }

    async fn sum_by_filter(&self, filter: &CostFilter) -> AppResult<i64> {
        self.prepare_connection().await?;

        let total = Self::sum_query(filter)
            .into_tuple::<i64>()
            .one(&self.db)
            .await?;

        Ok(total.unwrap_or(0))
    }
}
