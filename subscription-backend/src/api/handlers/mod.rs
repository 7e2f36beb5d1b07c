// src/api/handlers/mod.rs
pub mod subscription_handler;
