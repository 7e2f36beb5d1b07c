// src/db.rs
use crate::config::Config;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr,
    Statement,
};
use std::time::Duration;

pub type DbPool = DatabaseConnection;

pub async fn create_db_pool(config: &Config) -> Result<DbPool, DbErr> {
    Database::connect(&config.database_url).await
}

// スキーマを指定して接続する
pub async fn create_db_pool_with_schema(config: &Config, schema: &str) -> Result<DbPool, DbErr> {
    let mut opt = ConnectOptions::new(config.database_url.clone());

    // 接続オプションを設定
    opt.max_connections(100)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8 * 60))
        .set_schema_search_path(schema.to_string());

    Database::connect(opt).await
}

// 識別子はバインドできないため、ダブルクォートをエスケープして埋め込む
fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

// 既存の接続にスキーマを設定するヘルパー関数
pub async fn set_schema(conn: &DbPool, schema: &str) -> Result<(), DbErr> {
    let set_search_path = format!("SET search_path TO {};", quote_identifier(schema));
    conn.execute(Statement::from_string(
        DatabaseBackend::Postgres,
        set_search_path,
    ))
    .await?;
    Ok(())
}

// スキーマが存在するか確認するヘルパー関数
pub async fn schema_exists(conn: &DbPool, schema: &str) -> Result<bool, DbErr> {
    let result_opt = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT EXISTS (
                SELECT 1 FROM information_schema.schemata
                WHERE schema_name = $1
            ) AS \"exists\";",
            [schema.into()],
        ))
        .await?;

    // 結果がない場合は false とみなす
    match result_opt {
        Some(result) => result.try_get("", "exists"),
        None => Ok(false),
    }
}

// スキーマを作成するヘルパー関数
pub async fn create_schema(conn: &DbPool, schema: &str) -> Result<(), DbErr> {
    let create_schema = format!("CREATE SCHEMA IF NOT EXISTS {};", quote_identifier(schema));
    conn.execute(Statement::from_string(
        DatabaseBackend::Postgres,
        create_schema,
    ))
    .await?;
    Ok(())
}
