// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Implementation of the Puka Cuckoo Hash table.
//!
//! Every stored key lives in exactly one slot: its primary home
//! `h1(key) % primary.len()` or its secondary home `h2(key) % secondary.len()`.
//! Lookups and removals therefore probe at most two slots. Inserts run the
//! bounded eviction walk and fall back to growing both arrays when the walk
//! cannot find room.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::data_structures::puka_cuckoo_hash::config::PukaCuckooHashConfig;
use crate::data_structures::puka_cuckoo_hash::displace::displace;
use crate::data_structures::puka_cuckoo_hash::error::{PukaCuckooHashError, Result};
use crate::data_structures::puka_cuckoo_hash::hash::{CuckooHasher, KeyHashes};
use crate::data_structures::puka_cuckoo_hash::slot::{ArrayName, Entry, Slot};

/// A set-membership index built on two-array cuckoo hashing.
///
/// The table owns both slot arrays outright and requires `&mut self` for
/// every mutation; callers sharing a table across threads must serialize
/// access themselves (for example with a `Mutex`).
///
/// # Type Parameters
///
/// * `K` - The key type. Must implement `Hash + Eq`. Defaults to `String`.
///
/// # Examples
///
/// ```
/// use puka_lib::data_structures::puka_cuckoo_hash::PukaCuckooHash;
///
/// let mut table: PukaCuckooHash = PukaCuckooHash::new(10, 11, 0.5, 1.5, 5)?;
///
/// assert!(table.insert("zero".to_string())?);
/// assert!(!table.insert("zero".to_string())?); // already present
/// assert!(table.lookup("zero"));
/// assert!(table.remove("zero"));
/// assert!(!table.remove("zero"));
/// assert!(table.is_empty());
/// # Ok::<(), puka_lib::data_structures::puka_cuckoo_hash::PukaCuckooHashError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PukaCuckooHash<K = String> {
    /// Slots addressed by the primary hash
    primary: Vec<Slot<K>>,

    /// Slots addressed by the secondary hash
    secondary: Vec<Slot<K>>,

    /// Number of occupied slots across both arrays
    count: usize,

    /// The configuration the table was built with
    config: PukaCuckooHashConfig,

    /// Diagnostic counters
    counters: Counters,
}

#[derive(Debug, Clone, Copy, Default)]
struct Counters {
    resizes: u64,
    failed_walks: u64,
    displacements: u64,
}

/// Point-in-time statistics for a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableStats {
    /// Number of stored keys
    pub len: usize,
    /// Current primary array capacity
    pub primary_capacity: usize,
    /// Current secondary array capacity
    pub secondary_capacity: usize,
    /// `len / (primary_capacity + secondary_capacity)`
    pub load_factor: f64,
    /// Configured occupancy ceiling
    pub max_occupancy: f64,
    /// Completed resizes since construction
    pub resizes: u64,
    /// Eviction walks that hit the chain bound, including those during resizes
    pub failed_walks: u64,
    /// Keys evicted by successful inserts
    pub displacements: u64,
}

/// Why the table is growing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GrowthReason {
    /// One more key would push the table past its occupancy ceiling
    Load,
    /// An eviction walk ran out of steps
    Displacement,
}

impl fmt::Display for GrowthReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrowthReason::Load => f.write_str("load"),
            GrowthReason::Displacement => f.write_str("displacement"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Capacities {
    primary: usize,
    secondary: usize,
}

impl Capacities {
    fn total(&self) -> usize {
        self.primary.saturating_add(self.secondary)
    }

    fn of(&self, array: ArrayName) -> usize {
        match array {
            ArrayName::Primary => self.primary,
            ArrayName::Secondary => self.secondary,
        }
    }
}

/// Tracks the reactive growth steps one insert call may still take.
#[derive(Debug)]
struct RehashBudget {
    used: usize,
    max: usize,
}

impl RehashBudget {
    fn new(max: usize) -> Self {
        Self { used: 0, max }
    }

    fn spend(&mut self) -> Result<()> {
        if self.used >= self.max {
            warn!(attempts = self.used, "cuckoo insert gave up after repeated growth");
            return Err(PukaCuckooHashError::RehashingFailed {
                attempts: self.used,
            });
        }
        self.used += 1;
        Ok(())
    }
}

/// A candidate layout built during a resize: slot contents are indices into
/// the list of keys being rehashed.
struct Layout {
    primary: Vec<Slot<usize>>,
    secondary: Vec<Slot<usize>>,
}

impl<K> PukaCuckooHash<K>
where
    K: Hash + Eq,
{
    /// Creates an empty table.
    ///
    /// # Arguments
    ///
    /// * `primary_capacity` - Initial slots in the primary array.
    /// * `secondary_capacity` - Initial slots in the secondary array.
    /// * `max_occupancy` - Load factor ceiling, in `(0, 1]`.
    /// * `growth_factor` - Capacity multiplier on resize, greater than 1.
    /// * `max_chain` - Eviction steps allowed before resizing.
    ///
    /// # Returns
    ///
    /// The new table, or `InvalidConfiguration` if any parameter is unusable.
    pub fn new(
        primary_capacity: usize,
        secondary_capacity: usize,
        max_occupancy: f64,
        growth_factor: f64,
        max_chain: usize,
    ) -> Result<Self> {
        Self::with_config(
            PukaCuckooHashConfig::new()
                .with_capacities(primary_capacity, secondary_capacity)
                .with_max_occupancy(max_occupancy)
                .with_growth_factor(growth_factor)
                .with_max_chain(max_chain),
        )
    }

    /// Creates an empty table with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the hash table.
    ///
    /// # Returns
    ///
    /// The new table, or `InvalidConfiguration` if the configuration fails
    /// validation or its capacities cannot be allocated.
    pub fn with_config(config: PukaCuckooHashConfig) -> Result<Self> {
        config.validate()?;
        let capacities = Capacities {
            primary: config.primary_capacity,
            secondary: config.secondary_capacity,
        };
        let (primary, secondary) = allocate(capacities, Slot::empty_array).map_err(|array| {
            PukaCuckooHashError::InvalidConfiguration(format!(
                "cannot allocate {} slots for the {array} array",
                capacities.of(array)
            ))
        })?;
        Ok(Self {
            primary,
            secondary,
            count: 0,
            config,
            counters: Counters::default(),
        })
    }

    /// Returns the number of keys in the table.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns whether the table holds no keys.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current number of slots in the primary array.
    pub fn primary_capacity(&self) -> usize {
        self.primary.len()
    }

    /// Current number of slots in the secondary array.
    pub fn secondary_capacity(&self) -> usize {
        self.secondary.len()
    }

    /// Calculates the current load factor of the table.
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.capacities().total() as f64
    }

    /// The configuration the table was built with. Capacities in it are the
    /// initial ones; see [`primary_capacity`](Self::primary_capacity) for the live values.
    pub fn config(&self) -> &PukaCuckooHashConfig {
        &self.config
    }

    /// Returns a statistics snapshot.
    pub fn stats(&self) -> TableStats {
        TableStats {
            len: self.count,
            primary_capacity: self.primary.len(),
            secondary_capacity: self.secondary.len(),
            load_factor: self.load_factor(),
            max_occupancy: self.config.max_occupancy,
            resizes: self.counters.resizes,
            failed_walks: self.counters.failed_walks,
            displacements: self.counters.displacements,
        }
    }

    /// Checks if the key exists in the table.
    ///
    /// Probes the key's primary home and then its secondary home; nothing else.
    pub fn lookup<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Inserts a key if it is not already present.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to insert.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if the key was stored
    /// * `Ok(false)` if it was already present (nothing changes)
    /// * `Err(RehashingFailed)` if eviction kept failing after
    ///   `max_rehash_attempts` growth steps; every previously stored key is
    ///   still present and `key` is not
    /// * `Err(CapacityOverflow)` if the arrays cannot grow any further, either
    ///   because the new size is not representable or because it cannot be
    ///   allocated; the table is left as it was
    pub fn insert(&mut self, key: K) -> Result<bool> {
        if self.lookup(&key) {
            return Ok(false);
        }

        let mut budget = RehashBudget::new(self.config.max_rehash_attempts);
        if self.exceeds_occupancy(self.count + 1, self.capacities()) {
            self.resize(GrowthReason::Load, &mut budget)?;
        }

        let mut homeless = key;
        loop {
            let hasher = self.hasher();
            match displace(
                &mut self.primary,
                &mut self.secondary,
                homeless,
                self.config.max_chain,
                |key, array| hasher.index(key, array),
            ) {
                Ok(placement) => {
                    self.count += 1;
                    self.counters.displacements += placement.evictions as u64;
                    trace!(
                        array = %placement.array,
                        index = placement.index,
                        evictions = placement.evictions,
                        "key placed"
                    );
                    return Ok(true);
                }
                Err(key) => {
                    // The walk was unwound, so `key` is the caller's key again.
                    self.counters.failed_walks += 1;
                    trace!(max_chain = self.config.max_chain, "eviction walk exhausted");
                    budget.spend()?;
                    self.resize(GrowthReason::Displacement, &mut budget)?;
                    homeless = key;
                }
            }
        }
    }

    /// Removes a key from the table.
    ///
    /// # Returns
    ///
    /// `true` if the key was present and removed, `false` otherwise.
    /// Removal never shrinks the table.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.find(key) {
            Some((array, index)) => {
                self.slots_mut(array)[index].take();
                self.count -= 1;
                true
            }
            None => false,
        }
    }

    /// Iterates over every occupied slot: the primary array first, then the
    /// secondary, each in ascending index order.
    ///
    /// The iterator is lazy and borrows the table, so it always reflects one
    /// consistent snapshot; call `entries` again to restart.
    pub fn entries(&self) -> impl Iterator<Item = Entry<'_, K>> + '_ {
        ArrayName::BOTH.into_iter().flat_map(move |array| {
            self.slots(array)
                .iter()
                .enumerate()
                .filter_map(move |(index, slot)| slot.get().map(|key| Entry { array, index, key }))
        })
    }

    /// Iterates over the stored keys in [`entries`](Self::entries) order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries().map(|entry| entry.key)
    }

    fn find<Q>(&self, key: &Q) -> Option<(ArrayName, usize)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hasher = self.hasher();
        ArrayName::BOTH
            .into_iter()
            .map(|array| (array, hasher.index(key, array)))
            .find(|&(array, index)| {
                self.slots(array)[index]
                    .get()
                    .is_some_and(|stored| stored.borrow() == key)
            })
    }

    fn slots(&self, array: ArrayName) -> &[Slot<K>] {
        match array {
            ArrayName::Primary => &self.primary,
            ArrayName::Secondary => &self.secondary,
        }
    }

    fn slots_mut(&mut self, array: ArrayName) -> &mut [Slot<K>] {
        match array {
            ArrayName::Primary => &mut self.primary,
            ArrayName::Secondary => &mut self.secondary,
        }
    }

    // Built from the live array lengths on every call.
    fn hasher(&self) -> CuckooHasher {
        CuckooHasher::new(self.primary.len(), self.secondary.len())
    }

    fn capacities(&self) -> Capacities {
        Capacities {
            primary: self.primary.len(),
            secondary: self.secondary.len(),
        }
    }

    fn exceeds_occupancy(&self, keys: usize, capacities: Capacities) -> bool {
        keys as f64 / capacities.total() as f64 > self.config.max_occupancy
    }

    /// The next capacities after `from`: one growth step, then as many more
    /// as needed for `keys` to stay within the occupancy ceiling.
    fn grown_capacities(&self, from: Capacities, keys: usize) -> Result<Capacities> {
        let factor = self.config.growth_factor;
        let mut next = from;
        loop {
            next = Capacities {
                primary: grow_capacity(next.primary, factor).ok_or(
                    PukaCuckooHashError::CapacityOverflow {
                        array: ArrayName::Primary,
                        capacity: next.primary,
                    },
                )?,
                secondary: grow_capacity(next.secondary, factor).ok_or(
                    PukaCuckooHashError::CapacityOverflow {
                        array: ArrayName::Secondary,
                        capacity: next.secondary,
                    },
                )?,
            };
            if !self.exceeds_occupancy(keys, next) {
                return Ok(next);
            }
        }
    }

    /// Grows both arrays and rehashes every stored key into them.
    ///
    /// Candidate layouts are built over key indices with hashes computed once,
    /// so a failed attempt leaves the live arrays untouched. Each failed
    /// attempt spends one unit of `budget` and grows again. Every allocation
    /// happens before the first key leaves the live arrays.
    fn resize(&mut self, reason: GrowthReason, budget: &mut RehashBudget) -> Result<()> {
        let hashes: Vec<KeyHashes> = self
            .primary
            .iter()
            .chain(self.secondary.iter())
            .filter_map(Slot::get)
            .map(KeyHashes::of)
            .collect();
        debug_assert_eq!(hashes.len(), self.count);

        // Room for the key whose insert triggered the resize.
        let required = self.count + 1;
        let from = self.capacities();
        let mut target = self.grown_capacities(from, required)?;

        let overflow = |array: ArrayName| PukaCuckooHashError::CapacityOverflow {
            array,
            capacity: from.of(array),
        };

        let layout = loop {
            match build_layout(&hashes, target, self.config.max_chain).map_err(overflow)? {
                Some(layout) => break layout,
                None => {
                    self.counters.failed_walks += 1;
                    trace!(
                        primary = target.primary,
                        secondary = target.secondary,
                        "rehash attempt failed, growing again"
                    );
                    budget.spend()?;
                    target = self.grown_capacities(target, required)?;
                }
            }
        };

        let (primary, secondary) = allocate(target, Slot::with_room).map_err(overflow)?;
        let mut keys: Vec<Option<K>> = Vec::new();
        keys.try_reserve_exact(self.count).map_err(|_| overflow(ArrayName::Primary))?;

        keys.extend(
            self.primary
                .iter_mut()
                .chain(self.secondary.iter_mut())
                .filter_map(Slot::take)
                .map(Some),
        );
        self.primary = materialize(layout.primary, &mut keys, primary);
        self.secondary = materialize(layout.secondary, &mut keys, secondary);
        self.counters.resizes += 1;

        debug!(
            reason = %reason,
            keys = self.count,
            from_primary = from.primary,
            from_secondary = from.secondary,
            to_primary = target.primary,
            to_secondary = target.secondary,
            "resized cuckoo table"
        );
        Ok(())
    }
}

/// Multiplies a capacity by the growth factor, always gaining at least one slot.
fn grow_capacity(capacity: usize, factor: f64) -> Option<usize> {
    let scaled = (capacity as f64 * factor).floor();
    if !(scaled < usize::MAX as f64) {
        return None;
    }
    let minimum = capacity.checked_add(1)?;
    Some((scaled as usize).max(minimum))
}

/// Allocates a pair of slot arrays, naming the array whose allocation failed.
fn allocate<T, E>(
    capacities: Capacities,
    alloc: fn(usize) -> std::result::Result<Vec<Slot<T>>, E>,
) -> std::result::Result<(Vec<Slot<T>>, Vec<Slot<T>>), ArrayName> {
    let primary = alloc(capacities.primary).map_err(|_| ArrayName::Primary)?;
    let secondary = alloc(capacities.secondary).map_err(|_| ArrayName::Secondary)?;
    Ok((primary, secondary))
}

/// Places every key index into fresh arrays of the given capacities.
///
/// `Ok(None)` means some walk ran out of steps; `Err` names the array that
/// could not be allocated.
fn build_layout(
    hashes: &[KeyHashes],
    capacities: Capacities,
    max_chain: usize,
) -> std::result::Result<Option<Layout>, ArrayName> {
    let hasher = CuckooHasher::new(capacities.primary, capacities.secondary);
    let (primary, secondary) = allocate(capacities, Slot::empty_array)?;
    let mut layout = Layout { primary, secondary };
    for key_index in 0..hashes.len() {
        let placed = displace(
            &mut layout.primary,
            &mut layout.secondary,
            key_index,
            max_chain,
            |&i, array| hasher.index_of_hashes(&hashes[i], array),
        );
        if placed.is_err() {
            return Ok(None);
        }
    }
    Ok(Some(layout))
}

/// Swaps key indices in a layout for the keys themselves, filling `slots`,
/// which already has room for the whole layout.
fn materialize<K>(
    layout: Vec<Slot<usize>>,
    keys: &mut [Option<K>],
    mut slots: Vec<Slot<K>>,
) -> Vec<Slot<K>> {
    slots.extend(layout.into_iter().map(|slot| match slot {
        Slot::Occupied(i) => keys[i].take().map_or(Slot::Empty, Slot::Occupied),
        Slot::Empty => Slot::Empty,
    }));
    slots
}

impl<K: fmt::Display> fmt::Display for PukaCuckooHash<K> {
    /// Renders one line per array listing `index: key` for occupied slots.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, slots) in [("Table1", &self.primary), ("Table2", &self.secondary)] {
            writeln!(f, "{label}:")?;
            let mut occupied = slots
                .iter()
                .enumerate()
                .filter_map(|(index, slot)| slot.get().map(|key| (index, key)));
            if let Some((index, key)) = occupied.next() {
                write!(f, "{index}: {key}")?;
                for (index, key) in occupied {
                    write!(f, " {index}: {key}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
