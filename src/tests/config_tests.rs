//! Tests for the configuration module.
//!
//! This module contains tests for configuration loading, validation, and usage.

use crate::config::{ConfigLoader, LogConfig, PukaConfig, Validate};
use crate::data_structures::PukaCuckooHash;
use crate::error::config::ConfigError;
use crate::tests::TestFixture;
use test_case::test_case;

/// Test that default configuration can be created and is valid.
#[test]
fn test_default_config_is_valid() {
    let config = PukaConfig::default();
    assert!(config.validate().is_ok());
    assert!(PukaCuckooHash::<String>::with_config(config.table).is_ok());
}

/// Test that configuration validation catches invalid values.
#[test]
fn test_config_validation() {
    let mut config = PukaConfig::default();

    // Invalid table configuration
    config.table.max_chain = 0;
    assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

    // Fix and test another invalid value
    config.table.max_chain = 5;
    config.log.level = "verbose".to_string();
    assert!(config.validate().is_err());

    config.log.level = "debug".to_string();
    assert!(config.validate().is_ok());
}

#[test_case("trace", true ; "trace level")]
#[test_case("info", true ; "info level")]
#[test_case("error", true ; "error level")]
#[test_case("INFO", false ; "uppercase level")]
#[test_case("", false ; "empty level")]
fn test_log_level_validation(level: &str, valid: bool) {
    let config = LogConfig {
        level: level.to_string(),
        ..LogConfig::default()
    };
    assert_eq!(config.validate().is_ok(), valid);
}

/// Test loading configuration from a TOML file.
#[test]
fn test_load_config_from_file() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "config_file_test.toml",
            r#"
    [table]
    primary_capacity = 64
    secondary_capacity = 67
    growth_factor = 2

    [log]
    level = "debug"
    "#,
        )
        .unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_FILE");
    let config = loader.load().unwrap();

    assert_eq!(config.table.primary_capacity, 64);
    assert_eq!(config.table.secondary_capacity, 67);
    assert_eq!(config.table.growth_factor, 2.0);
    assert_eq!(config.log.level, "debug");

    // Other values should be defaults
    assert_eq!(config.table.max_chain, 5);
    assert_eq!(config.table.max_occupancy, 0.5);
    assert!(!config.log.json);
}

/// Test loading configuration from a JSON file.
#[test]
fn test_load_config_from_json() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "config_file_test.json",
            r#"{ "table": { "max_chain": 12, "max_occupancy": 0.4 } }"#,
        )
        .unwrap();

    let config = ConfigLoader::new(Some(&config_path), "TEST_JSON").load().unwrap();

    assert_eq!(config.table.max_chain, 12);
    assert_eq!(config.table.max_occupancy, 0.4);
}

/// Test loading configuration with environment variable overrides.
#[test]
fn test_env_var_override() {
    let mut fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "config_env_test.toml",
            r#"
    [table]
    max_chain = 7
    "#,
        )
        .unwrap();

    fixture.set_env("TEST_ENV__TABLE__MAX_CHAIN", "9");
    fixture.set_env("TEST_ENV__LOG__JSON", "true");

    let loader = ConfigLoader::new(Some(&config_path), "TEST_ENV");
    let config = loader.load().unwrap();

    // Verify environment variables took precedence
    assert_eq!(config.table.max_chain, 9);
    assert!(config.log.json);
}

/// Test that a missing configuration file is reported as such.
#[test]
fn test_missing_config_file() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture.temp_dir.path().join("absent.toml");

    let loader = ConfigLoader::new(Some(&config_path), "TEST_MISSING");
    assert!(matches!(loader.load(), Err(ConfigError::FileNotFound(path)) if path == config_path));
}

/// Test that loading an invalid configuration file returns an error.
#[test]
fn test_load_invalid_config() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "invalid.toml",
            r#"
    [table
    max_chain = five"
    "#,
        )
        .unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_INVALID");
    assert!(matches!(loader.load(), Err(ConfigError::ParseError(_))));
}

/// Test that a well-formed file with unusable table parameters fails validation.
#[test]
fn test_load_rejects_invalid_table() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file("bad_table.toml", "[table]\ngrowth_factor = 1.0\n")
        .unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_BAD_TABLE");
    assert!(matches!(loader.load(), Err(ConfigError::ValidationError(_))));
}

/// Test that unsupported file extensions are rejected.
#[test]
fn test_unsupported_extension() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture.create_file("config.ini", "[table]\n").unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_EXT");
    assert!(matches!(loader.load(), Err(ConfigError::ParseError(_))));
}

/// Test that the generated default configuration loads back unchanged.
#[test]
fn test_generated_config_round_trips() {
    let fixture = TestFixture::new().unwrap();
    let toml = toml::to_string_pretty(&PukaConfig::default()).unwrap();
    let config_path = fixture.create_file("generated.toml", toml).unwrap();

    let config = ConfigLoader::new(Some(&config_path), "TEST_GENERATED")
        .load()
        .unwrap();
    assert_eq!(config, PukaConfig::default());
}
