//! Tests for the error module.
//!
//! This module contains tests for error handling and error types.

use crate::data_structures::PukaCuckooHashError;
use crate::error::config::ConfigError;
use crate::error::script::ScriptError;
use crate::error::{ErrorContext, ErrorReporter, MockErrorReporter, PukaError, TracingErrorReporter};

/// Test that error context can be created and displayed properly.
#[test]
fn test_error_context_display() {
    let error = PukaError::Custom("test error".to_string());
    let context = ErrorContext::new(error, "test_component").with_details("additional details");

    let display_string = format!("{context}");
    assert!(display_string.contains("test error"));
    assert!(display_string.contains("test_component"));
    assert!(display_string.contains("additional details"));
}

/// Test that nested errors work correctly.
#[test]
fn test_nested_errors() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let puka_error = PukaError::Io(io_error);
    assert!(format!("{puka_error}").contains("file not found"));

    let table_error: PukaError = PukaCuckooHashError::RehashingFailed { attempts: 3 }.into();
    assert_eq!(
        table_error.to_string(),
        "Table error: Insertion failed after 3 rehash attempts, key not inserted"
    );

    let script_error: PukaError = ScriptError::MissingKey {
        line: 4,
        op: "insert".to_string(),
    }
    .into();
    assert_eq!(
        script_error.to_string(),
        "Script error: line 4: 'insert' requires a key"
    );

    let config_error: PukaError = ConfigError::ValidationError("bad".to_string()).into();
    assert!(matches!(config_error, PukaError::Config(_)));
}

/// Test that span traces are left out when no error layer is installed.
#[test]
fn test_span_trace_without_layer() {
    let context = ErrorContext::new(PukaError::Custom("x".to_string()), "test").with_span_trace();
    assert!(context.trace.is_none());
}

/// Test that reporters receive the context they are handed.
#[test]
fn test_reporter_receives_context() {
    let mut reporter = MockErrorReporter::new();
    reporter
        .expect_report()
        .withf(|context| {
            context.component == "script"
                && context.details.as_deref() == Some("demo.txt")
                && matches!(context.error, PukaError::Script(_))
        })
        .times(1)
        .return_const(());

    let error = ScriptError::UnknownOperation {
        line: 1,
        op: "fly".to_string(),
    };
    reporter.report(ErrorContext::new(error.into(), "script").with_details("demo.txt"));
}

/// Test that the default tracing error reporter can be used.
#[test]
fn test_tracing_error_reporter() {
    let reporter = TracingErrorReporter;
    let error = PukaError::Custom("test error".to_string());
    let context = ErrorContext::new(error, "test_component").with_trace("span trace");

    // Just make sure this doesn't panic
    reporter.report(context);
}
