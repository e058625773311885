//! Dense state identifiers and bit-set state sets used by the algorithms.

use fixedbitset::FixedBitSet;
use std::fmt;

/// A dense state identifier, assigned by the interner in declaration order.
pub type StateId = u32;

/// A set of dense states backed by a growable bit set.
///
/// Equality and hashing depend on the underlying bit length, so composite
/// states are keyed by [`StateSet::to_vec`] instead of by the set itself.
#[derive(Clone, Default)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create a new empty state set with room for `capacity` states.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Create a state set containing a single state.
    pub fn singleton(state: StateId, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(state);
        set
    }

    /// Insert a state, returning `true` if it was not present before.
    pub fn insert(&mut self, state: StateId) -> bool {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        !self.bits.put(idx)
    }

    /// Check if the set contains a state.
    pub fn contains(&self, state: StateId) -> bool {
        self.bits.contains(state as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Iterate over the members in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }

    /// Union this set with another, modifying self in place.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// Check if this set shares at least one state with another.
    pub fn intersects(&self, other: &StateSet) -> bool {
        self.bits.intersection(&other.bits).next().is_some()
    }

    /// Canonical sorted representation, used as a key for composite states.
    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::default();
        for state in iter {
            set.insert(state);
        }
        set
    }
}
