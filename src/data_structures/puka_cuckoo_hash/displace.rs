// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! The bounded eviction walk.
//!
//! A walk carries exactly one homeless item. Each step tries the item's
//! primary slot and then its secondary slot, evicting the occupant of each
//! and carrying that one forward. If `max_chain` steps pass without finding
//! an empty slot, the walk is replayed backwards so both arrays end up
//! exactly as they were and the original item is handed back to the caller.
//!
//! Unwinding needs no trail: an evicted item always came from its own home
//! slot on the side it was evicted from, so its index can be recomputed.

use super::slot::{ArrayName, Slot};

/// Where a successful walk left the last homeless item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Placement {
    pub(crate) array: ArrayName,
    pub(crate) index: usize,
    /// Number of occupants evicted along the way
    pub(crate) evictions: usize,
}

/// Places `item` using at most `max_chain` primary/secondary steps.
///
/// `locate` must return the home index of an item in the given array for the
/// current array sizes.
///
/// On failure the arrays are restored and `item` is returned untouched.
pub(crate) fn displace<T, F>(
    primary: &mut [Slot<T>],
    secondary: &mut [Slot<T>],
    item: T,
    max_chain: usize,
    locate: F,
) -> Result<Placement, T>
where
    F: Fn(&T, ArrayName) -> usize,
{
    let mut current = item;
    let mut evictions = 0;

    for _ in 0..max_chain {
        for array in ArrayName::BOTH {
            let index = locate(&current, array);
            let slots = match array {
                ArrayName::Primary => &mut *primary,
                ArrayName::Secondary => &mut *secondary,
            };
            match slots[index].replace(current) {
                None => {
                    return Ok(Placement {
                        array,
                        index,
                        evictions,
                    })
                }
                Some(evicted) => {
                    current = evicted;
                    evictions += 1;
                }
            }
        }
    }

    // Eviction k happened on the primary side for even k, secondary for odd k.
    for step in (0..evictions).rev() {
        let array = ArrayName::BOTH[step % 2];
        let index = locate(&current, array);
        let slots = match array {
            ArrayName::Primary => &mut *primary,
            ArrayName::Secondary => &mut *secondary,
        };
        current = match slots[index].replace(current) {
            Some(previous) => previous,
            None => unreachable!("evicted item's home slot is occupied until the walk is unwound"),
        };
    }

    Err(current)
}
