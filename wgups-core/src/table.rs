//! Open-addressing hash table with linear probing.
//!
//! [`Table`] backs every keyed collection in the engine: packages by id,
//! distances by address, and the command and prompt registries of the CLI.
//!
//! Each slot is [`Slot::Vacant`] (never used), [`Slot::Tombstone`] (emptied by
//! a removal) or [`Slot::Occupied`]. Lookups stop at the first vacant slot but
//! probe straight through tombstones, because an entry inserted before a
//! removal may sit further along the probe sequence. Inserting a new key once
//! the live entries fill the capacity doubles the slot array and rehashes
//! every live entry in scan order.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

/// Capacity used by [`Table::new`].
pub const DEFAULT_CAPACITY: usize = 10;

/// State of a single table slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<K, V> {
    /// Empty since the slot array was created.
    Vacant,
    /// Empty because its previous occupant was deleted.
    Tombstone,
    /// Holds a live key/value pair.
    Occupied(K, V),
}

impl<K, V> Slot<K, V> {
    const fn is_empty(&self) -> bool {
        !matches!(self, Self::Occupied(..))
    }
}

/// A generic key/value map using linear probing.
///
/// Hashing uses [`DefaultHasher`] with its fixed keys, so the slot layout and
/// scan order are identical across runs for the same insertion sequence.
///
/// # Examples
/// ```
/// use wgups_core::Table;
///
/// let mut table = Table::with_capacity(2);
/// assert!(table.set("depot", 0));
/// assert!(table.set("hub", 1));
/// assert!(table.set("annex", 2)); // triggers a resize
/// assert_eq!(table.get("hub"), Some(&1));
/// assert!(table.delete("hub"));
/// assert_eq!(table.get("hub"), None);
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Clone)]
pub struct Table<K, V> {
    slots: Vec<Slot<K, V>>,
    live: usize,
}

impl<K, V> Table<K, V> {
    /// Create an empty table with [`DEFAULT_CAPACITY`] slots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty table with `capacity` slots (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Self::vacant_slots(capacity.max(1)),
            live: 0,
        }
    }

    /// Number of slots currently allocated.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.live
    }

    /// Whether the table holds no live entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Iterate over live entries in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    /// Iterate over live keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Iterate over live values in slot order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Iterate mutably over live values in slot order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.slots.iter_mut().filter_map(|slot| match slot {
            Slot::Occupied(_, value) => Some(value),
            Slot::Vacant | Slot::Tombstone => None,
        })
    }

    /// Read-only view of the raw slots, including empty markers.
    #[must_use]
    pub fn slots(&self) -> &[Slot<K, V>] {
        &self.slots
    }

    fn vacant_slots(capacity: usize) -> Vec<Slot<K, V>> {
        std::iter::repeat_with(|| Slot::Vacant)
            .take(capacity)
            .collect()
    }
}

impl<K: Hash + Eq, V> Table<K, V> {
    /// Insert or overwrite the value stored under `key`.
    ///
    /// Growth is driven by live entries only; tombstones left by
    /// [`Table::delete`] never trigger a resize, so after heavy deletion a
    /// lookup for a missing key may probe every slot.
    ///
    /// Returns `false` only when no empty slot could be found, which the
    /// resize policy rules out; the failure is logged as an invariant breach.
    pub fn set(&mut self, key: K, value: V) -> bool {
        if let Some(index) = self.find(&key) {
            if let Some(Slot::Occupied(_, existing)) = self.slots.get_mut(index) {
                *existing = value;
                return true;
            }
        }
        if self.live >= self.capacity() {
            self.grow();
        }
        self.insert_new(key, value)
    }

    /// Look up the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key)?;
        match self.slots.get(index) {
            Some(Slot::Occupied(_, value)) => Some(value),
            _ => None,
        }
    }

    /// Look up the value stored under `key` for mutation.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key)?;
        match self.slots.get_mut(index) {
            Some(Slot::Occupied(_, value)) => Some(value),
            _ => None,
        }
    }

    /// Whether a live entry exists for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Remove the entry for `key`, leaving a tombstone in its slot.
    ///
    /// Returns `false` when the key was absent.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(index) = self.find(key) else {
            return false;
        };
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = Slot::Tombstone;
                self.live -= 1;
                true
            }
            None => false,
        }
    }

    /// Probe for the slot holding `key`.
    ///
    /// Stops on a vacant slot or after a full sweep; tombstones are skipped.
    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let capacity = self.capacity();
        let start = home_slot(key, capacity);
        for probe in 0..capacity {
            let index = (start + probe).rem_euclid(capacity);
            match self.slots.get(index)? {
                Slot::Vacant => return None,
                Slot::Occupied(existing, _) if existing.borrow() == key => return Some(index),
                Slot::Occupied(..) | Slot::Tombstone => {}
            }
        }
        None
    }

    /// Place a key known to be absent into the first empty slot of either kind.
    fn insert_new(&mut self, key: K, value: V) -> bool {
        let capacity = self.capacity();
        let start = home_slot(&key, capacity);
        let free = (0..capacity)
            .map(|probe| (start + probe).rem_euclid(capacity))
            .find(|&index| self.slots.get(index).is_some_and(Slot::is_empty));
        match free.and_then(|index| self.slots.get_mut(index)) {
            Some(slot) => {
                *slot = Slot::Occupied(key, value);
                self.live += 1;
                true
            }
            None => {
                log::error!(
                    "table insert found no free slot among {capacity} slots with {} live entries",
                    self.live
                );
                false
            }
        }
    }

    /// Double the slot array and reinsert live entries in scan order.
    fn grow(&mut self) {
        let capacity = self.capacity().saturating_mul(2);
        log::debug!("resizing table from {} to {capacity} slots", self.capacity());
        let previous = std::mem::replace(&mut self.slots, Self::vacant_slots(capacity));
        self.live = 0;
        for slot in previous {
            if let Slot::Occupied(key, value) = slot {
                self.insert_new(key, value);
            }
        }
    }
}

fn home_slot<Q: Hash + ?Sized>(key: &Q, capacity: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    let modulus = u64::try_from(capacity).unwrap_or(u64::MAX);
    // The remainder is below `capacity`, which itself came from a `usize`.
    usize::try_from(hasher.finish().rem_euclid(modulus)).unwrap_or_default()
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Table<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for Table<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K: Hash + Eq, V> Extend<(K, V)> for Table<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

/// Iterator over the live entries of a [`Table`].
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    slots: std::slice::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|slot| match slot {
            Slot::Occupied(key, value) => Some((key, value)),
            Slot::Vacant | Slot::Tombstone => None,
        })
    }
}

impl<'a, K, V> IntoIterator for &'a Table<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
