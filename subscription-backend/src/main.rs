// src/main.rs
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use subscription_backend::api::handlers::subscription_handler::subscription_router;
use subscription_backend::api::AppState;
use subscription_backend::config::Config;
use subscription_backend::db::{
    create_db_pool, create_db_pool_with_schema, create_schema, schema_exists,
};
use subscription_backend::service::subscription_service::SubscriptionService;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subscription_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting Subscription Backend server...");

    // 設定を読み込む
    let app_config = Config::from_env()?;
    tracing::info!(
        server_addr = %app_config.server_addr,
        db_schema = ?app_config.db_schema,
        run_migrations = app_config.run_migrations,
        "Configuration loaded"
    );

    // データベース接続を作成
    let db_pool = if let Some(schema) = &app_config.db_schema {
        tracing::info!("Using schema: {}", schema);

        // まず基本接続でスキーマの存在を確認し、なければ作成
        let base_pool = create_db_pool(&app_config).await?;
        if !schema_exists(&base_pool, schema).await? {
            tracing::info!("Schema does not exist, creating it: {}", schema);
            create_schema(&base_pool, schema).await?;
        }

        create_db_pool_with_schema(&app_config, schema).await?
    } else {
        create_db_pool(&app_config).await?
    };

    tracing::info!("Database pool created successfully.");

    if app_config.run_migrations {
        Migrator::up(&db_pool, None).await?;
        tracing::info!("Database migrations applied.");
    }

    let subscription_service = match app_config.db_schema.clone() {
        Some(schema) => SubscriptionService::with_schema(db_pool, schema),
        None => SubscriptionService::with_db(db_pool),
    };

    let app_state = AppState::new(Arc::new(subscription_service));
    let app_router = subscription_router(app_state);

    tracing::info!(
        "Router configured. Server listening on {}",
        app_config.server_addr
    );

    let listener = TcpListener::bind(&app_config.server_addr).await?;
    axum::serve(listener, app_router.into_make_service()).await?;

    Ok(())
}
