//! Data structures for the Puka index.
//!
//! This module contains the in-memory structures that back the index.
//! All implementations adhere to the project requirements:
//! - No unsafe code
//! - Explicit error types for every fallible operation
//! - Single-owner mutation; callers add their own locking when sharing

pub mod puka_cuckoo_hash;

// Re-export common data structures
pub use puka_cuckoo_hash::{PukaCuckooHash, PukaCuckooHashConfig, PukaCuckooHashError};
