// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Hash functions for the Puka Cuckoo Hash table.
//!
//! The two arrays are addressed by unrelated algorithms: FNV-1a for the
//! primary array and seeded SipHash for the secondary one. Both are pure
//! functions of the key, so indices can be recomputed at any time against
//! whatever capacities the table currently has.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::slot::ArrayName;

/// Seed mixed into the secondary hash so it never degenerates into the primary one.
#[allow(clippy::unreadable_literal)]
const SECONDARY_SEED: u64 = 0x83588256c732eb1f;

/// Computes the primary (FNV-1a) hash of a key.
pub fn primary_hash<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = fnv::FnvHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Computes the secondary (seeded SipHash) hash of a key.
pub fn secondary_hash<K: Hash + ?Sized>(key: &K) -> u64 {
    hash_with_seed(key, SECONDARY_SEED)
}

/// Computes a hash value for the given key with the specified seed.
///
/// # Arguments
///
/// * `key` - The key to hash.
/// * `seed` - The seed to use in the hash function.
///
/// # Returns
///
/// The computed hash value.
pub fn hash_with_seed<K: Hash + ?Sized>(key: &K, seed: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    key.hash(&mut hasher);
    hasher.finish()
}

/// Both hash values of a key, computed once.
///
/// Resizing reuses these instead of rehashing every key on each growth attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct KeyHashes {
    primary: u64,
    secondary: u64,
}

impl KeyHashes {
    pub(crate) fn of<K: Hash + ?Sized>(key: &K) -> Self {
        Self {
            primary: primary_hash(key),
            secondary: secondary_hash(key),
        }
    }
}

/// Maps hash values onto slot indices for a pair of array sizes.
///
/// A `CuckooHasher` is built from the live array lengths for every operation
/// and never outlives a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CuckooHasher {
    primary_size: usize,
    secondary_size: usize,
}

impl CuckooHasher {
    /// Creates a hasher for arrays of the given sizes. Both sizes must be non-zero.
    pub(crate) fn new(primary_size: usize, secondary_size: usize) -> Self {
        debug_assert!(primary_size > 0 && secondary_size > 0);
        Self {
            primary_size,
            secondary_size,
        }
    }

    /// Slot index of `key` in the given array.
    pub(crate) fn index<K: Hash + ?Sized>(&self, key: &K, array: ArrayName) -> usize {
        match array {
            ArrayName::Primary => reduce(primary_hash(key), self.primary_size),
            ArrayName::Secondary => reduce(secondary_hash(key), self.secondary_size),
        }
    }

    /// Slot index for precomputed hashes in the given array.
    pub(crate) fn index_of_hashes(&self, hashes: &KeyHashes, array: ArrayName) -> usize {
        match array {
            ArrayName::Primary => reduce(hashes.primary, self.primary_size),
            ArrayName::Secondary => reduce(hashes.secondary, self.secondary_size),
        }
    }
}

fn reduce(hash: u64, size: usize) -> usize {
    // size fits in u64 on every supported target, and the remainder is below size
    (hash % size as u64) as usize
}
