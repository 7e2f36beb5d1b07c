// src/config.rs
use dotenvy::dotenv;
use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub db_schema: Option<String>,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok(); // .env ファイルを読み込む (存在しなくてもエラーにしない)

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| database_url_from_parts());

        let mut server_addr =
            env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        if let Ok(port) = env::var("APP_PORT") {
            let port: u16 = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "APP_PORT",
                value: port.clone(),
            })?;
            let host = server_addr
                .rsplit_once(':')
                .map_or(server_addr.as_str(), |(host, _)| host);
            server_addr = format!("{}:{}", host, port);
        }

        let db_schema = env::var("DB_SCHEMA").ok().filter(|s| !s.trim().is_empty());

        let run_migrations = match env::var("RUN_MIGRATIONS") {
            Ok(value) => parse_bool("RUN_MIGRATIONS", &value)?,
            Err(_) => true,
        };

        Ok(Config {
            database_url,
            server_addr,
            db_schema,
            run_migrations,
        })
    }
}

// DATABASE_URL がない場合は個別の DB_* 変数から組み立てる
fn database_url_from_parts() -> String {
    let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
    let user = env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string());
    let password = env::var("DB_PASSWORD").unwrap_or_default();
    let name = env::var("DB_NAME").unwrap_or_else(|_| "subscriptions".to_string());

    format!(
        "postgres://{}:{}@{}:{}/{}",
        user, password, host, port, name
    )
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}
