// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Slot storage for the Puka Cuckoo Hash table.

use std::collections::TryReserveError;
use std::fmt;

use serde::Serialize;

/// Identifies one of the two backing arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayName {
    /// Addressed by the first hash function
    Primary,
    /// Addressed by the second hash function
    Secondary,
}

impl ArrayName {
    /// Both arrays in walk order.
    pub const BOTH: [ArrayName; 2] = [ArrayName::Primary, ArrayName::Secondary];
}

impl fmt::Display for ArrayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayName::Primary => f.write_str("primary"),
            ArrayName::Secondary => f.write_str("secondary"),
        }
    }
}

/// One storage cell of a backing array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Slot<T> {
    Empty,
    Occupied(T),
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<T> Slot<T> {
    /// Reserves room for exactly `capacity` slots without filling any.
    ///
    /// Fails instead of aborting when the allocator cannot provide the memory.
    pub(crate) fn with_room(capacity: usize) -> Result<Vec<Slot<T>>, TryReserveError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        Ok(slots)
    }

    /// Allocates `capacity` empty slots.
    pub(crate) fn empty_array(capacity: usize) -> Result<Vec<Slot<T>>, TryReserveError> {
        let mut slots = Self::with_room(capacity)?;
        slots.resize_with(capacity, Slot::default);
        Ok(slots)
    }

    pub(crate) fn get(&self) -> Option<&T> {
        match self {
            Slot::Empty => None,
            Slot::Occupied(item) => Some(item),
        }
    }

    /// Stores `item` and hands back the previous occupant, if any.
    pub(crate) fn replace(&mut self, item: T) -> Option<T> {
        match std::mem::replace(self, Slot::Occupied(item)) {
            Slot::Empty => None,
            Slot::Occupied(previous) => Some(previous),
        }
    }

    /// Empties the slot, returning what it held.
    pub(crate) fn take(&mut self) -> Option<T> {
        match std::mem::take(self) {
            Slot::Empty => None,
            Slot::Occupied(item) => Some(item),
        }
    }
}

/// An occupied slot as reported by [`PukaCuckooHash::entries`](super::PukaCuckooHash::entries).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a, K> {
    /// The array holding the key
    pub array: ArrayName,
    /// The slot index within that array
    pub index: usize,
    /// The stored key
    pub key: &'a K,
}
