// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Puka Cuckoo Hash: a set-membership index with O(1) worst-case lookup.
//!
//! Keys live in one of two slot arrays, each addressed by its own hash
//! function. A key is always found at its primary home or its secondary home,
//! so a lookup touches at most two slots.
//!
//! # Features
//!
//! - Worst-case O(1) lookup and removal, amortized O(1) insertion
//! - Bounded eviction walk; a walk that runs out of steps is rolled back
//! - Proactive growth at a configurable occupancy ceiling and reactive growth
//!   when eviction fails, with a per-insert cap on repeated growth
//! - Zero unsafe code
//!
//! # Example
//!
//! ```
//! use puka_lib::data_structures::puka_cuckoo_hash::{PukaCuckooHash, PukaCuckooHashConfig};
//!
//! let config = PukaCuckooHashConfig::new()
//!     .with_capacities(10, 11)
//!     .with_max_occupancy(0.5)
//!     .with_growth_factor(1.5)
//!     .with_max_chain(5);
//! let mut table: PukaCuckooHash = PukaCuckooHash::with_config(config)?;
//!
//! for key in ["zero", "one", "two"] {
//!     table.insert(key.to_string())?;
//! }
//!
//! assert!(table.lookup("one"));
//! assert!(!table.lookup("aardvark"));
//! assert_eq!(table.len(), 3);
//! # Ok::<(), puka_lib::data_structures::puka_cuckoo_hash::PukaCuckooHashError>(())
//! ```
//!
//! # Growth Strategy
//!
//! 1. Before placing a new key, the table grows if one more key would exceed
//!    `max_occupancy`.
//! 2. Placement evicts at most one occupant per array per step, for up to
//!    `max_chain` steps.
//! 3. If no empty slot turns up, the walk is undone, both arrays grow by
//!    `growth_factor`, every key is rehashed, and the insert is retried.
//! 4. Each insert may grow reactively at most `max_rehash_attempts` times
//!    before reporting [`PukaCuckooHashError::RehashingFailed`].

// Module declarations
mod config;
mod displace;
mod error;
mod hash;
mod slot;
mod table;

#[cfg(test)]
mod tests;

// Re-exports
pub use config::PukaCuckooHashConfig;
pub use error::{PukaCuckooHashError, Result};
pub use hash::{hash_with_seed, primary_hash, secondary_hash};
pub use slot::{ArrayName, Entry};
pub use table::{PukaCuckooHash, TableStats};
