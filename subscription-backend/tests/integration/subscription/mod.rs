// tests/integration/subscription/mod.rs

pub mod error_response_tests;
pub mod total_cost_tests;
