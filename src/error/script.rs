//! Script error module.
//!
//! This module defines error types raised while parsing operation scripts.
//! Line numbers are 1-based.

use thiserror::Error;

/// Errors that can occur while parsing an operation script.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ScriptError {
    /// Error when a line starts with a keyword that is not an operation.
    #[error("line {line}: unknown operation '{op}'")]
    UnknownOperation {
        /// The offending line
        line: usize,
        /// The unrecognized keyword
        op: String,
    },

    /// Error when a keyed operation has no key.
    #[error("line {line}: '{op}' requires a key")]
    MissingKey {
        /// The offending line
        line: usize,
        /// The operation missing its key
        op: String,
    },

    /// Error when an operation that takes no key is given one.
    #[error("line {line}: '{op}' does not take a key")]
    UnexpectedKey {
        /// The offending line
        line: usize,
        /// The operation that was given a key
        op: String,
    },
}
