// tests/unit/main.rs

#[path = "../common/mod.rs"]
mod common;

mod domain_model_tests;
