// src/domain/mod.rs
pub mod cost_filter;
pub mod month_year;
pub mod subscription_model;
