// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Puka Cuckoo Hash table.

use super::slot::ArrayName;

/// Error types for Puka Cuckoo Hash operations
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum PukaCuckooHashError {
    /// The table parameters cannot produce a usable table
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Displacement kept failing even after repeated growth
    #[error("Insertion failed after {attempts} rehash attempts, key not inserted")]
    RehashingFailed {
        /// Number of growth steps tried before giving up
        attempts: usize,
    },

    /// Growing an array would exceed the addressable slot count or the
    /// memory the allocator can provide
    #[error("Cannot grow {array} array beyond {capacity} slots")]
    CapacityOverflow {
        /// The array that could not grow
        array: ArrayName,
        /// Its capacity at the time of the failed growth
        capacity: usize,
    },
}

/// Result type for Puka Cuckoo Hash operations
pub type Result<T> = std::result::Result<T, PukaCuckooHashError>;
