// Integration test modules
pub mod analytics_tests;
pub mod config_tests;
pub mod export_tests;
pub mod property_tests;
pub mod source_tests;
pub mod stream_tests;

// Shared helpers
#[path = "../common/mod.rs"]
pub mod common;
