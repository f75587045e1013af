//! Integration test modules.

pub mod common;
pub mod content_api_tests;
pub mod health_tests;
pub mod hydration_tests;
pub mod page_tests;
