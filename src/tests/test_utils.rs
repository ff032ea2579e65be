//! Test utilities and fixtures for the Puka index.
//!
//! This module provides reusable test components, fixtures, and helpers
//! for property-based testing and configuration tests.

use proptest::strategy::{BoxedStrategy, Strategy};
use std::path::PathBuf;
use tempfile::TempDir;

/// Maximum key length for generated test data.
const MAX_KEY_LENGTH: usize = 24;

/// Generate a strategy for non-empty, single-line keys.
///
/// Keys never start or end with whitespace, so they survive a trip through
/// the script format unchanged.
pub fn key_strategy() -> BoxedStrategy<String> {
    proptest::string::string_regex(&format!("[a-zA-Z0-9_-][a-zA-Z0-9 _-]{{0,{}}}", MAX_KEY_LENGTH - 2))
        .expect("valid key regex")
        .prop_map(|s| s.trim_end().to_string())
        .boxed()
}

/// Test fixture for tests that need files on disk or environment overrides.
pub struct TestFixture {
    /// Temporary directory for test files
    pub temp_dir: TempDir,
    /// Vector of environment variables to cleanup after tests
    env_vars: Vec<String>,
}

impl TestFixture {
    /// Create a new test fixture.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
            env_vars: Vec::new(),
        })
    }

    /// Set an environment variable for this test.
    ///
    /// The variable will be cleaned up when the fixture is dropped.
    pub fn set_env<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key_str = key.into();
        std::env::set_var(&key_str, value.into());
        self.env_vars.push(key_str);
    }

    /// Write a file with the given name inside the fixture directory.
    ///
    /// # Returns
    ///
    /// A result containing the path to the file or an error.
    pub fn create_file<C: AsRef<[u8]>>(&self, name: &str, contents: C) -> std::io::Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

impl Drop for TestFixture {
    fn drop(&mut self) {
        // Clean up any environment variables we set
        for key in &self.env_vars {
            std::env::remove_var(key);
        }
    }
}
