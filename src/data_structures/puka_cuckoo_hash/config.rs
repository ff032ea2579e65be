// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration options for the Puka Cuckoo Hash table.

use serde::{Deserialize, Serialize};

use super::error::{PukaCuckooHashError, Result};

/// Configuration for the Puka Cuckoo Hash table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PukaCuckooHashConfig {
    /// Initial number of slots in the primary array.
    pub primary_capacity: usize,

    /// Initial number of slots in the secondary array.
    pub secondary_capacity: usize,

    /// Maximum ratio of stored keys to total slots, in `(0, 1]`.
    /// Cuckoo hashing with two arrays performs best at or below 0.5.
    pub max_occupancy: f64,

    /// Factor both arrays are multiplied by when the table grows. Must exceed 1.
    pub growth_factor: f64,

    /// Maximum number of primary/secondary eviction steps before an insert
    /// gives up on the current layout and grows the table.
    pub max_chain: usize,

    /// Maximum number of growth steps a single insert may trigger because of
    /// failed eviction walks before it reports failure.
    pub max_rehash_attempts: usize,
}

impl PukaCuckooHashConfig {
    /// Creates a new configuration with default values.
    ///
    /// # Returns
    ///
    /// A new `PukaCuckooHashConfig` instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial capacities of both arrays.
    ///
    /// # Arguments
    ///
    /// * `primary_capacity` - Slots in the primary array.
    /// * `secondary_capacity` - Slots in the secondary array.
    ///
    /// # Returns
    ///
    /// Self with the updated configuration.
    pub fn with_capacities(mut self, primary_capacity: usize, secondary_capacity: usize) -> Self {
        self.primary_capacity = primary_capacity;
        self.secondary_capacity = secondary_capacity;
        self
    }

    /// Sets the maximum occupancy ratio before the table grows proactively.
    pub fn with_max_occupancy(mut self, max_occupancy: f64) -> Self {
        self.max_occupancy = max_occupancy;
        self
    }

    /// Sets the factor both arrays grow by.
    pub fn with_growth_factor(mut self, growth_factor: f64) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    /// Sets the maximum eviction chain length.
    pub fn with_max_chain(mut self, max_chain: usize) -> Self {
        self.max_chain = max_chain;
        self
    }

    /// Sets how many reactive growth steps one insert may trigger.
    pub fn with_max_rehash_attempts(mut self, max_rehash_attempts: usize) -> Self {
        self.max_rehash_attempts = max_rehash_attempts;
        self
    }

    /// Checks that a table can be built from this configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if every parameter is usable
    /// * `Err(PukaCuckooHashError::InvalidConfiguration)` naming the first bad parameter
    pub fn validate(&self) -> Result<()> {
        if self.primary_capacity == 0 {
            return Err(invalid("primary_capacity must be greater than 0"));
        }
        if self.secondary_capacity == 0 {
            return Err(invalid("secondary_capacity must be greater than 0"));
        }
        // Written so that NaN fails too.
        if !(self.max_occupancy > 0.0 && self.max_occupancy <= 1.0) {
            return Err(invalid("max_occupancy must be in (0.0, 1.0]"));
        }
        if !(self.growth_factor > 1.0 && self.growth_factor.is_finite()) {
            return Err(invalid("growth_factor must be a finite value greater than 1.0"));
        }
        if self.max_chain == 0 {
            return Err(invalid("max_chain must be greater than 0"));
        }
        if self.max_rehash_attempts == 0 {
            return Err(invalid("max_rehash_attempts must be greater than 0"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> PukaCuckooHashError {
    PukaCuckooHashError::InvalidConfiguration(reason.to_string())
}

impl Default for PukaCuckooHashConfig {
    fn default() -> Self {
        Self {
            primary_capacity: 10,
            secondary_capacity: 11,
            max_occupancy: 0.5,      // 50% load factor is typically good for cuckoo hashing
            growth_factor: 1.5,
            max_chain: 5,
            max_rehash_attempts: 8,  // 1.5^8 is roughly 25x growth within one insert
        }
    }
}
