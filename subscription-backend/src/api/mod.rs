// src/api/mod.rs
use crate::service::subscription_service::SubscriptionService;
use std::sync::Arc;

pub mod dto;
pub mod handlers;

/// ハンドラー間で共有するアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub subscription_service: Arc<SubscriptionService>,
}

impl AppState {
    pub fn new(subscription_service: Arc<SubscriptionService>) -> Self {
        Self {
            subscription_service,
        }
    }
}
