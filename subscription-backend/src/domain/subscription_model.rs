// src/domain/subscription_model.rs
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub service_name: String,
    pub price: i32,
    #[sea_orm(column_type = "Text")]
    pub user_id: String,
    pub start_date: NaiveDate,
    #[sea_orm(nullable)]
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

// updated_at はサービス層が SubscriptionChanges で明示的に設定する
impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 新しいサブスクリプションを作成（created_at / updated_at を現在時刻で設定）
    pub fn new(
        id: String,
        service_name: String,
        price: i32,
        user_id: String,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            service_name,
            price,
            user_id,
            start_date,
            end_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// 挿入用に全フィールドを Set した ActiveModel に変換
    pub fn into_insert_model(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            service_name: Set(self.service_name),
            price: Set(self.price),
            user_id: Set(self.user_id),
            start_date: Set(self.start_date),
            end_date: Set(self.end_date),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
        }
    }

    /// 指定した変更内容を適用したコピーを返す（id と created_at は保持）
    pub fn with_changes(&self, changes: &SubscriptionChanges) -> Self {
        Self {
            id: self.id.clone(),
            service_name: changes.service_name.clone(),
            price: changes.price,
            user_id: changes.user_id.clone(),
            start_date: changes.start_date,
            end_date: changes.end_date,
            created_at: self.created_at,
            updated_at: changes.updated_at,
        }
    }
}

/// 更新時に置き換える全フィールド
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriptionChanges {
    pub service_name: String,
    pub price: i32,
    pub user_id: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

impl SubscriptionChanges {
    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            service_name: Set(self.service_name),
            price: Set(self.price),
            user_id: Set(self.user_id),
            start_date: Set(self.start_date),
            end_date: Set(self.end_date),
            updated_at: Set(self.updated_at),
            ..Default::default()
        }
    }
}
