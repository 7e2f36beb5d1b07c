use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// 合計金額の集計で使うフィルタ列
const INDEXES: [(&str, Subscriptions); 3] = [
    ("idx_subscriptions_user_id", Subscriptions::UserId),
    ("idx_subscriptions_service_name", Subscriptions::ServiceName),
    ("idx_subscriptions_start_date", Subscriptions::StartDate),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, column) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .table(Subscriptions::Table)
                        .name(name)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _) in INDEXES {
            manager
                .drop_index(
                    Index::drop()
                        .if_exists()
                        .table(Subscriptions::Table)
                        .name(name)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}

/// Reference to the subscriptions table
#[derive(DeriveIden, Clone, Copy)]
enum Subscriptions {
    Table,
    UserId,
    ServiceName,
    StartDate,
}
