//! Test modules for the Puka index.
//!
//! This module contains crate-level testing infrastructure:
//! - Configuration loading and validation tests
//! - Error framework tests
//! - Script runner tests against generated tables
//! - Shared fixtures and proptest strategies

pub mod config_tests;
pub mod error_tests;
pub mod test_utils;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{key_strategy, TestFixture};
