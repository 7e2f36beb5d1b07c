// src/repository/mod.rs
pub mod subscription_repository;

pub use subscription_repository::{SubscriptionRepository, SubscriptionStore};
