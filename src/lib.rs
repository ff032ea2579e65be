//! Puka Index Library
//!
//! This library contains the core components of the Puka index: the cuckoo
//! hash table, its configuration and error types, and a small script runner
//! for driving a table from text. The library is used by the `puka` binary,
//! but can also be used as a dependency by other projects.
//!
//! # Architecture
//!
//! The crate is designed with the following principles in mind:
//! - Strict component boundaries
//! - Worst-case O(1) membership queries
//! - Comprehensive error handling and propagation
//! - No unsafe code

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;
pub mod script;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for the Puka index.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
